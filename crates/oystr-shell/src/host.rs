//! Menu host: owns the runtime snapshot and the installed menu.
//!
//! [`MenuHost::rebuild`] is the only place the process-wide menu gets
//! replaced. The coordinator reaches it through [`HostHooks`], the language
//! switch through [`HostNotifier`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use oystr_menu::model::find_node;
use oystr_menu::{
    ContentView, LanguageCode, MenuAction, MenuNode, MenuTreeBuilder, Notifier, RuntimeState,
    ShellEvent, WindowManager, WindowRole,
};
use oystr_node::{NodeState, RestartHooks};

use crate::error::{Result, ShellError};

/// Puts a built tree in front of the user.
pub trait MenuInstaller {
    /// Replace the installed menu with `tree`.
    fn install(&self, tree: Vec<MenuNode>) -> Result<()>;

    /// Next clicked item's action, if the installer receives clicks itself.
    fn poll_action(&self) -> Option<MenuAction> {
        None
    }
}

/// Keeps the last installed tree in memory.
///
/// Used where there is no native menu bar: the tree is printed or
/// activated by id instead.
#[derive(Debug, Default)]
pub struct OutlineMenu {
    tree: RefCell<Vec<MenuNode>>,
    installs: Cell<usize>,
}

impl OutlineMenu {
    /// Empty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last installed tree.
    #[must_use]
    pub fn tree(&self) -> Vec<MenuNode> {
        self.tree.borrow().clone()
    }

    /// How many times a tree was installed.
    #[must_use]
    pub fn install_count(&self) -> usize {
        self.installs.get()
    }
}

impl MenuInstaller for OutlineMenu {
    fn install(&self, tree: Vec<MenuNode>) -> Result<()> {
        *self.tree.borrow_mut() = tree;
        self.installs.set(self.installs.get() + 1);
        Ok(())
    }
}

/// Installer for the current target: the native menu bar on macOS, the
/// in-memory outline elsewhere.
#[must_use]
pub fn platform_installer() -> Rc<dyn MenuInstaller> {
    #[cfg(target_os = "macos")]
    {
        Rc::new(crate::native::NativeMenu::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Rc::new(OutlineMenu::new())
    }
}

/// Builds menus from the current runtime snapshot and installs them.
pub struct MenuHost {
    builder: MenuTreeBuilder,
    installer: Rc<dyn MenuInstaller>,
    runtime: RefCell<RuntimeState>,
}

impl MenuHost {
    /// Host starting from `runtime`; nothing is installed yet.
    pub fn new(
        builder: MenuTreeBuilder,
        installer: Rc<dyn MenuInstaller>,
        runtime: RuntimeState,
    ) -> Self {
        Self {
            builder,
            installer,
            runtime: RefCell::new(runtime),
        }
    }

    /// Current runtime snapshot.
    #[must_use]
    pub fn runtime(&self) -> RuntimeState {
        self.runtime.borrow().clone()
    }

    /// Build the tree for the current snapshot without installing it.
    #[must_use]
    pub fn build(&self) -> Vec<MenuNode> {
        self.builder.build(&self.runtime.borrow())
    }

    /// Build and install.
    ///
    /// # Errors
    ///
    /// Returns an error if the installer rejects the tree.
    pub fn rebuild(&self) -> Result<()> {
        let tree = self.build();
        tracing::debug!(menus = tree.len(), "Installing application menu");
        self.installer.install(tree)
    }

    /// Record a committed node state.
    pub fn set_node(&self, node: NodeState) {
        self.runtime.borrow_mut().node = node;
    }

    /// Record the interface language.
    pub fn set_language(&self, language: LanguageCode) {
        self.runtime.borrow_mut().language = language;
    }

    /// Record the open content views and rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if the installer rejects the tree.
    pub fn set_views(&self, views: Vec<ContentView>) -> Result<()> {
        self.runtime.borrow_mut().views = views;
        self.rebuild()
    }

    /// Action of the enabled item with `id` in the current tree.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such item, it is disabled, or the
    /// platform handles it natively.
    pub fn action_for(&self, id: &str) -> Result<MenuAction> {
        let tree = self.build();
        let item = find_node(&tree, id)
            .and_then(MenuNode::as_item)
            .ok_or_else(|| ShellError::UnknownItem(id.to_string()))?;
        if !item.enabled {
            return Err(ShellError::DisabledItem(id.to_string()));
        }
        item.menu_action()
            .cloned()
            .ok_or_else(|| ShellError::NativeItem(id.to_string()))
    }

    fn rebuild_logged(&self) {
        if let Err(err) = self.rebuild() {
            tracing::error!(error = %err, "Failed to rebuild application menu");
        }
    }
}

/// Follow-ups the coordinator runs once a switch settles.
pub struct HostHooks {
    host: Rc<MenuHost>,
    windows: Rc<dyn WindowManager>,
    interface_url: String,
}

impl HostHooks {
    /// Hooks driving `host` and the main window of `windows`, which is
    /// pointed back at `interface_url` after a switch.
    pub fn new(
        host: Rc<MenuHost>,
        windows: Rc<dyn WindowManager>,
        interface_url: impl Into<String>,
    ) -> Self {
        Self {
            host,
            windows,
            interface_url: interface_url.into(),
        }
    }
}

impl RestartHooks for HostHooks {
    fn reload_interface(&self) {
        match self.windows.window(WindowRole::Main) {
            Some(window) => {
                tracing::debug!(url = %self.interface_url, "Reloading interface");
                if let Err(err) = window.reload(&self.interface_url) {
                    tracing::warn!(error = %err, url = %self.interface_url, "Failed to reload interface");
                }
            }
            None => tracing::debug!("No main window to reload"),
        }
    }

    fn rebuild_menu(&self, state: &NodeState) {
        self.host.set_node(*state);
        self.host.rebuild_logged();
    }
}

/// Applies shell events to the menu.
pub struct HostNotifier {
    host: Rc<MenuHost>,
}

impl HostNotifier {
    /// Notifier updating `host`.
    pub fn new(host: Rc<MenuHost>) -> Self {
        Self { host }
    }
}

impl Notifier for HostNotifier {
    fn emit(&self, event: ShellEvent) {
        match event {
            ShellEvent::LanguageChanged(code) => {
                self.host.set_language(code);
                self.host.rebuild_logged();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use oystr_menu::{
        AppWindow, KeyTranslator, MenuConfig, OverlayKind, OverlayOptions, PlatformId, UiMode,
        WindowError, ids,
    };
    use oystr_node::{Network, NodeType};

    fn host(installer: Rc<OutlineMenu>) -> MenuHost {
        let builder = MenuTreeBuilder::new(
            MenuConfig::new(PlatformId::Linux),
            Rc::new(KeyTranslator::new(["en", "de"])),
            Rc::new(BTreeMap::new()),
        );
        let runtime = RuntimeState::new(
            NodeState::owned(NodeType::Geth, Network::Test),
            UiMode::Mist,
            LanguageCode::from("en"),
        );
        MenuHost::new(builder, installer, runtime)
    }

    #[test]
    fn test_rebuild_installs_current_snapshot() {
        let outline = Rc::new(OutlineMenu::new());
        let host = host(Rc::clone(&outline));
        assert_eq!(outline.install_count(), 0);

        host.rebuild().unwrap();
        assert_eq!(outline.install_count(), 1);
        assert_eq!(outline.tree(), host.build());
    }

    #[test]
    fn test_action_for() {
        let host = host(Rc::new(OutlineMenu::new()));
        assert_eq!(host.action_for(ids::QUIT).unwrap(), MenuAction::Quit);
        assert!(matches!(
            host.action_for(ids::IMPORT_PRESALE),
            Err(ShellError::DisabledItem(_))
        ));
        assert!(matches!(
            host.action_for(ids::COPY),
            Err(ShellError::NativeItem(_))
        ));
        assert!(matches!(
            host.action_for("nope"),
            Err(ShellError::UnknownItem(_))
        ));
    }

    /// Main window that only records reloads.
    #[derive(Default)]
    struct ReloadingWindow {
        reloads: RefCell<Vec<String>>,
    }

    impl AppWindow for ReloadingWindow {
        fn reload(&self, url: &str) -> std::result::Result<(), WindowError> {
            self.reloads.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn send_message(
            &self,
            _channel: &str,
            _payload: serde_json::Value,
        ) -> std::result::Result<(), WindowError> {
            Ok(())
        }

        fn toggle_dev_tools(&self) -> std::result::Result<(), WindowError> {
            Ok(())
        }

        fn is_full_screen(&self) -> bool {
            false
        }

        fn set_full_screen(&self, _full_screen: bool) -> std::result::Result<(), WindowError> {
            Ok(())
        }

        fn set_language(&self, _code: &LanguageCode) -> std::result::Result<(), WindowError> {
            Ok(())
        }
    }

    struct MainOnly(Rc<ReloadingWindow>);

    impl WindowManager for MainOnly {
        fn window(&self, role: WindowRole) -> Option<Rc<dyn AppWindow>> {
            match role {
                WindowRole::Main => Some(Rc::clone(&self.0) as Rc<dyn AppWindow>),
            }
        }

        fn focused(&self) -> Option<Rc<dyn AppWindow>> {
            None
        }

        fn create_overlay(
            &self,
            _kind: OverlayKind,
            _options: OverlayOptions,
        ) -> std::result::Result<(), WindowError> {
            Ok(())
        }
    }

    #[test]
    fn test_switch_hooks_reload_configured_interface() {
        let outline = Rc::new(OutlineMenu::new());
        let host = Rc::new(host(Rc::clone(&outline)));
        let window = Rc::new(ReloadingWindow::default());
        let hooks = HostHooks::new(
            Rc::clone(&host),
            Rc::new(MainOnly(Rc::clone(&window))),
            "http://localhost:8080/",
        );

        hooks.reload_interface();
        assert_eq!(*window.reloads.borrow(), vec!["http://localhost:8080/"]);

        let switched = NodeState::owned(NodeType::Eth, Network::Main);
        hooks.rebuild_menu(&switched);
        assert_eq!(host.runtime().node, switched);
        assert_eq!(outline.install_count(), 1);
    }
}
