use super::MenuTreeBuilder;
use crate::ids;
use crate::model::{MenuItem, MenuNode, MenuRole, Submenu};

impl MenuTreeBuilder {
    pub(super) fn window_menu(&self) -> Submenu {
        Submenu::new(
            ids::WINDOW,
            self.label("window.label"),
            vec![
                MenuItem::role(ids::MINIMIZE, self.label("window.minimize"), MenuRole::Minimize)
                    .accelerator("CommandOrControl+M")
                    .into(),
                MenuItem::role(ids::CLOSE, self.label("window.close"), MenuRole::Close)
                    .accelerator("CommandOrControl+W")
                    .into(),
                MenuNode::Separator,
                MenuItem::role(
                    ids::TO_FRONT,
                    self.label("window.toFront"),
                    MenuRole::BringAllToFront,
                )
                .into(),
            ],
        )
        .with_role(MenuRole::Window)
    }
}
