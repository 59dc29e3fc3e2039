use super::{HELP_APP_ITEMS, MenuTreeBuilder};
use crate::action::{ExternalLink, MenuAction};
use crate::ids;
use crate::model::{MenuItem, MenuNode, MenuRole, Submenu};

impl MenuTreeBuilder {
    pub(super) fn help_menu(&self) -> Submenu {
        let mut children: Vec<MenuNode> = Vec::new();

        if HELP_APP_ITEMS.enabled(self.platform()) {
            children.push(
                MenuItem::action(ids::HELP_ABOUT, self.app_label("app.about"), MenuAction::About)
                    .into(),
            );
            children.push(
                MenuItem::action(
                    ids::HELP_CHECK_FOR_UPDATES,
                    self.label("app.checkForUpdates"),
                    MenuAction::CheckForUpdates,
                )
                .into(),
            );
        }

        let links = [
            (ids::WIKI, "help.mistWiki", ExternalLink::Wiki),
            (ids::CHAT, "help.gitter", ExternalLink::Chat),
            (ids::REPORT_BUG, "help.reportBug", ExternalLink::IssueTracker),
        ];
        children.extend(links.into_iter().map(|(id, key, link)| {
            MenuItem::action(id, self.label(key), MenuAction::OpenExternal(link)).into()
        }));

        Submenu::new(ids::HELP, self.label("help.label"), children).with_role(MenuRole::Help)
    }
}
