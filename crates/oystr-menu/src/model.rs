//! Menu tree data model.
//!
//! A node is an item, a submenu or a separator. Items always have exactly one
//! trigger (an application action or a native role) and never children, so
//! "click does something *and* opens a submenu" cannot be expressed.

use serde::Serialize;

use crate::action::MenuAction;

/// Keyboard accelerator in `muda` syntax (`CmdOrCtrl+Shift+U`, `F11`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Accelerator(String);

impl Accelerator {
    /// Wrap an accelerator string.
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// The accelerator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Native behaviour provided by the platform menu implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum MenuRole {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Minimize,
    Close,
    BringAllToFront,
    Hide,
    HideOthers,
    ShowAll,
    Services,
    Window,
    Help,
}

/// What happens when an item is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Dispatch an application action.
    Action(MenuAction),
    /// Let the platform handle it.
    Role(MenuRole),
}

/// A clickable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Stable identifier, unique within a tree.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Keyboard shortcut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<Accelerator>,
    /// `Some` for checkbox items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Whether the item can be clicked.
    pub enabled: bool,
    /// Click behaviour.
    pub trigger: Trigger,
}

impl MenuItem {
    /// Item dispatching an application action.
    pub fn action(id: impl Into<String>, label: impl Into<String>, action: MenuAction) -> Self {
        Self::with_trigger(id, label, Trigger::Action(action))
    }

    /// Item handled natively by the platform.
    pub fn role(id: impl Into<String>, label: impl Into<String>, role: MenuRole) -> Self {
        Self::with_trigger(id, label, Trigger::Role(role))
    }

    fn with_trigger(id: impl Into<String>, label: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accelerator: None,
            checked: None,
            enabled: true,
            trigger,
        }
    }

    /// Set the keyboard shortcut.
    #[must_use]
    pub fn accelerator(mut self, spec: &str) -> Self {
        self.accelerator = Some(Accelerator::new(spec));
        self
    }

    /// Turn the item into a checkbox.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Set whether the item can be clicked.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The action, if this item dispatches one.
    #[must_use]
    pub fn menu_action(&self) -> Option<&MenuAction> {
        match &self.trigger {
            Trigger::Action(action) => Some(action),
            Trigger::Role(_) => None,
        }
    }
}

/// A nested menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submenu {
    /// Stable identifier, unique within a tree.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Native role (window list, help search, services).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MenuRole>,
    /// Child nodes, in display order.
    pub children: Vec<MenuNode>,
}

impl Submenu {
    /// Create a submenu.
    pub fn new(id: impl Into<String>, label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            role: None,
            children,
        }
    }

    /// Attach a native role.
    #[must_use]
    pub fn with_role(mut self, role: MenuRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Items directly inside this submenu (separators and nested menus skipped).
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.children.iter().filter_map(MenuNode::as_item)
    }
}

/// One entry of a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuNode {
    /// Clickable entry.
    Item(MenuItem),
    /// Nested menu.
    Submenu(Submenu),
    /// Visual separator.
    Separator,
}

impl MenuNode {
    /// Identifier, if the node has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Item(item) => Some(&item.id),
            Self::Submenu(submenu) => Some(&submenu.id),
            Self::Separator => None,
        }
    }

    /// Display text, if the node has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Item(item) => Some(&item.label),
            Self::Submenu(submenu) => Some(&submenu.label),
            Self::Separator => None,
        }
    }

    /// The item, if this node is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// The submenu, if this node is one.
    #[must_use]
    pub fn as_submenu(&self) -> Option<&Submenu> {
        match self {
            Self::Submenu(submenu) => Some(submenu),
            _ => None,
        }
    }

    /// Depth-first search for the node with `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        match self {
            Self::Submenu(submenu) => find_node(&submenu.children, id),
            _ => None,
        }
    }
}

impl From<MenuItem> for MenuNode {
    fn from(item: MenuItem) -> Self {
        Self::Item(item)
    }
}

impl From<Submenu> for MenuNode {
    fn from(submenu: Submenu) -> Self {
        Self::Submenu(submenu)
    }
}

/// Depth-first search over a tree.
#[must_use]
pub fn find_node<'a>(tree: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    tree.iter().find_map(|node| node.find(id))
}

/// Every item in a tree, depth first.
#[must_use]
pub fn all_items(tree: &[MenuNode]) -> Vec<&MenuItem> {
    let mut items = Vec::new();
    collect_items(tree, &mut items);
    items
}

fn collect_items<'a>(nodes: &'a [MenuNode], out: &mut Vec<&'a MenuItem>) {
    for node in nodes {
        match node {
            MenuNode::Item(item) => out.push(item),
            MenuNode::Submenu(submenu) => collect_items(&submenu.children, out),
            MenuNode::Separator => {}
        }
    }
}
