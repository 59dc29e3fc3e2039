//! Native macOS menu bar via `muda`.
//!
//! Items carrying an application action become muda items with the tree's
//! stable id, so a click maps straight back to the action through the
//! registry filled at install time. Role items become predefined items and
//! never reach the shell.

use std::cell::RefCell;
use std::collections::HashMap;

use crossbeam_channel::TryRecvError;
use muda::accelerator::Accelerator;
use muda::{CheckMenuItem, IsMenuItem, Menu, MenuEvent, PredefinedMenuItem, Submenu};
use oystr_menu::{MenuAction, MenuItem, MenuNode, MenuRole, Trigger};

use crate::error::{Result, ShellError};
use crate::host::MenuInstaller;

/// Installed menu bar and the actions its items trigger.
struct Installed {
    #[allow(dead_code)]
    menu: Menu,
    actions: HashMap<String, MenuAction>,
}

/// [`MenuInstaller`] for the macOS menu bar.
pub struct NativeMenu {
    installed: RefCell<Option<Installed>>,
}

impl NativeMenu {
    /// Installer with nothing installed yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            installed: RefCell::new(None),
        }
    }
}

impl Default for NativeMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuInstaller for NativeMenu {
    fn install(&self, tree: Vec<MenuNode>) -> Result<()> {
        let menu = Menu::new();
        let mut actions = HashMap::new();
        let mut window_menu = None;
        let mut help_menu = None;

        for node in &tree {
            match node {
                MenuNode::Submenu(submenu) => {
                    let native = build_submenu(submenu, &mut actions)?;
                    menu.append(&native).map_err(install_error)?;
                    match submenu.role {
                        Some(MenuRole::Window) => window_menu = Some(native),
                        Some(MenuRole::Help) => help_menu = Some(native),
                        _ => {}
                    }
                }
                other => {
                    let native = build_node(other, &mut actions)?;
                    menu.append(&*native).map_err(install_error)?;
                }
            }
        }

        menu.init_for_nsapp();
        if let Some(window_menu) = &window_menu {
            window_menu.set_as_windows_menu_for_nsapp();
        }
        if let Some(help_menu) = &help_menu {
            help_menu.set_as_help_menu_for_nsapp();
        }

        tracing::debug!(actions = actions.len(), "Installed native menu bar");
        // The previous bar is dropped only once the new one is live.
        *self.installed.borrow_mut() = Some(Installed { menu, actions });
        Ok(())
    }

    fn poll_action(&self) -> Option<MenuAction> {
        let event = match MenuEvent::receiver().try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Menu event channel closed");
                return None;
            }
        };
        let id = event.id().0.as_str();
        let action = self
            .installed
            .borrow()
            .as_ref()
            .and_then(|installed| installed.actions.get(id).cloned());
        if action.is_none() {
            tracing::debug!(id, "Menu event without action");
        }
        action
    }
}

fn install_error(err: muda::Error) -> ShellError {
    ShellError::MenuInstall(err.to_string())
}

fn build_submenu(
    submenu: &oystr_menu::Submenu,
    actions: &mut HashMap<String, MenuAction>,
) -> Result<Submenu> {
    let native = Submenu::with_id(submenu.id.as_str(), &submenu.label, true);
    for child in &submenu.children {
        let item = build_node(child, actions)?;
        native.append(&*item).map_err(install_error)?;
    }
    Ok(native)
}

fn build_node(
    node: &MenuNode,
    actions: &mut HashMap<String, MenuAction>,
) -> Result<Box<dyn IsMenuItem>> {
    Ok(match node {
        MenuNode::Separator => Box::new(PredefinedMenuItem::separator()),
        MenuNode::Submenu(submenu) if submenu.role == Some(MenuRole::Services) => {
            Box::new(PredefinedMenuItem::services(Some(submenu.label.as_str())))
        }
        MenuNode::Submenu(submenu) => Box::new(build_submenu(submenu, actions)?),
        MenuNode::Item(item) => match &item.trigger {
            Trigger::Role(role) => predefined(*role, &item.label).ok_or_else(|| {
                ShellError::MenuInstall(format!("role {role:?} cannot be used on an item"))
            })?,
            Trigger::Action(action) => {
                actions.insert(item.id.clone(), action.clone());
                action_item(item)
            }
        },
    })
}

fn action_item(item: &MenuItem) -> Box<dyn IsMenuItem> {
    let accelerator = item.accelerator.as_ref().and_then(|spec| {
        spec.as_str()
            .parse::<Accelerator>()
            .inspect_err(|err| {
                tracing::warn!(id = %item.id, accelerator = spec.as_str(), error = %err, "Invalid accelerator");
            })
            .ok()
    });

    match item.checked {
        Some(checked) => Box::new(CheckMenuItem::with_id(
            item.id.as_str(),
            &item.label,
            item.enabled,
            checked,
            accelerator,
        )),
        None => Box::new(muda::MenuItem::with_id(
            item.id.as_str(),
            &item.label,
            item.enabled,
            accelerator,
        )),
    }
}

fn predefined(role: MenuRole, label: &str) -> Option<Box<dyn IsMenuItem>> {
    let text = Some(label);
    let item = match role {
        MenuRole::Undo => PredefinedMenuItem::undo(text),
        MenuRole::Redo => PredefinedMenuItem::redo(text),
        MenuRole::Cut => PredefinedMenuItem::cut(text),
        MenuRole::Copy => PredefinedMenuItem::copy(text),
        MenuRole::Paste => PredefinedMenuItem::paste(text),
        MenuRole::SelectAll => PredefinedMenuItem::select_all(text),
        MenuRole::Minimize => PredefinedMenuItem::minimize(text),
        MenuRole::Close => PredefinedMenuItem::close_window(text),
        MenuRole::BringAllToFront => PredefinedMenuItem::bring_all_to_front(text),
        MenuRole::Hide => PredefinedMenuItem::hide(text),
        MenuRole::HideOthers => PredefinedMenuItem::hide_others(text),
        MenuRole::ShowAll => PredefinedMenuItem::show_all(text),
        MenuRole::Services => PredefinedMenuItem::services(text),
        MenuRole::Window | MenuRole::Help => return None,
    };
    Some(Box::new(item))
}
