use super::{APP_IDENTITY_MENU, MenuTreeBuilder};
use crate::action::MenuAction;
use crate::ids;
use crate::model::{MenuItem, MenuNode, MenuRole, Submenu};

impl MenuTreeBuilder {
    pub(super) fn app_menu(&self) -> Submenu {
        let mut children: Vec<MenuNode> = Vec::new();

        if APP_IDENTITY_MENU.enabled(self.platform()) {
            children.extend([
                MenuItem::action(ids::ABOUT, self.app_label("app.about"), MenuAction::About)
                    .into(),
                MenuItem::action(
                    ids::CHECK_FOR_UPDATES,
                    self.label("app.checkForUpdates"),
                    MenuAction::CheckForUpdates,
                )
                .into(),
                MenuItem::action(
                    ids::CHECK_FOR_NODE_UPDATES,
                    self.label("app.checkForNodeUpdates"),
                    MenuAction::CheckForNodeUpdates,
                )
                .into(),
                MenuNode::Separator,
                Submenu::new(ids::SERVICES, self.app_label("app.services"), Vec::new())
                    .with_role(MenuRole::Services)
                    .into(),
                MenuNode::Separator,
                MenuItem::role(ids::HIDE, self.app_label("app.hide"), MenuRole::Hide)
                    .accelerator("Command+H")
                    .into(),
                MenuItem::role(
                    ids::HIDE_OTHERS,
                    self.app_label("app.hideOthers"),
                    MenuRole::HideOthers,
                )
                .accelerator("Command+Alt+H")
                .into(),
                MenuItem::role(ids::SHOW_ALL, self.app_label("app.showAll"), MenuRole::ShowAll)
                    .into(),
                MenuNode::Separator,
            ]);
        }

        children.push(
            MenuItem::action(ids::QUIT, self.app_label("app.quit"), MenuAction::Quit)
                .accelerator("CommandOrControl+Q")
                .into(),
        );

        Submenu::new(ids::APP, self.app_label("app.label"), children)
    }
}
