use oystr_node::{Network, NodeSwitchRequest, NodeType};

use super::{MenuTreeBuilder, NODE_SWITCHING};
use crate::action::MenuAction;
use crate::ids;
use crate::model::{MenuItem, MenuNode, Submenu};
use crate::state::{RuntimeState, UiMode};

impl MenuTreeBuilder {
    pub(super) fn develop_menu(&self, state: &RuntimeState) -> Submenu {
        let full_shell = state.ui_mode.is_full_shell();
        let owned = state.node.is_owned();

        let mut children: Vec<MenuNode> = vec![
            Submenu::new(
                ids::DEVTOOLS,
                self.label("develop.devTools"),
                self.devtools_items(state),
            )
            .into(),
        ];

        if full_shell {
            children.push(
                MenuItem::action(
                    ids::OPEN_REMIX,
                    self.label("develop.openRemix"),
                    MenuAction::OpenRemix,
                )
                .into(),
            );
        }

        children.push(
            MenuItem::action(
                ids::RUN_TESTS,
                self.label("develop.runTests"),
                MenuAction::RunTests,
            )
            .enabled(full_shell)
            .into(),
        );

        let mut log_label = self.label("develop.logFiles");
        if !owned {
            log_label.push_str(&format!(" ({})", self.label("develop.externalNode")));
        }
        children.push(
            MenuItem::action(ids::LOG_FILES, log_label, MenuAction::ShowNodeLog)
                .enabled(owned)
                .into(),
        );

        if NODE_SWITCHING.enabled(self.platform()) {
            children.push(MenuNode::Separator);
            if let Some(nodes) = self.node_menu(state) {
                children.push(nodes.into());
            }
            children.push(self.network_menu(state).into());
        }

        Submenu::new(ids::DEVELOP, self.label("develop.label"), children)
    }

    fn devtools_items(&self, state: &RuntimeState) -> Vec<MenuNode> {
        match state.ui_mode {
            UiMode::Mist => {
                let mut items = vec![
                    self.shell_devtools_item("develop.devToolsMistUI").into(),
                    MenuNode::Separator,
                ];
                items.extend(state.views.iter().map(|view| {
                    MenuItem::action(
                        ids::view_devtools_id(&view.id),
                        self.label_with(
                            "develop.devToolsWebview",
                            &[("webview", view.name.as_str())],
                        ),
                        MenuAction::ToggleViewDevTools(view.id.clone()),
                    )
                    .into()
                }));
                items
            }
            UiMode::Wallet => vec![self.shell_devtools_item("develop.devToolsWalletUI").into()],
        }
    }

    fn shell_devtools_item(&self, key: &str) -> MenuItem {
        MenuItem::action(
            ids::SHELL_DEVTOOLS,
            self.label(key),
            MenuAction::ToggleShellDevTools,
        )
        .accelerator("Alt+CommandOrControl+I")
    }

    /// Implementation switcher; `None` when no binary is installed.
    fn node_menu(&self, state: &RuntimeState) -> Option<Submenu> {
        let items: Vec<MenuNode> = NodeType::ALL
            .into_iter()
            .filter_map(|node| {
                let binary = self.catalog.available(node)?;
                let label = format!(
                    "{} {} ({})",
                    node.display_name(),
                    binary.version,
                    node.language()
                );
                Some(
                    MenuItem::action(
                        ids::node_id(node),
                        label,
                        MenuAction::SwitchNode(NodeSwitchRequest::new(node)),
                    )
                    .checked(state.node.runs_owned(node))
                    .enabled(state.node.is_owned())
                    .into(),
                )
            })
            .collect();

        if items.is_empty() {
            return None;
        }
        Some(Submenu::new(
            ids::NODE_MENU,
            self.label("develop.ethereumNode"),
            items,
        ))
    }

    fn network_menu(&self, state: &RuntimeState) -> Submenu {
        let items: Vec<MenuNode> = Network::ALL
            .into_iter()
            .map(|network| {
                let (key, shortcut) = match network {
                    Network::Main => ("develop.mainNetwork", "CommandOrControl+Shift+1"),
                    Network::Test => ("develop.testNetwork", "CommandOrControl+Shift+2"),
                };
                MenuItem::action(
                    ids::network_id(network),
                    self.label(key),
                    MenuAction::SwitchNode(NodeSwitchRequest::with_network(
                        state.node.node,
                        network,
                    )),
                )
                .accelerator(shortcut)
                .checked(state.node.runs_owned_on(network))
                .enabled(state.node.is_owned() && !state.node.runs_owned_on(network))
                .into()
            })
            .collect();

        Submenu::new(ids::NETWORK_MENU, self.label("develop.network"), items)
    }
}
