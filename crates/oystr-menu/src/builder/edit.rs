use super::MenuTreeBuilder;
use crate::ids;
use crate::model::{MenuItem, MenuNode, MenuRole, Submenu};

impl MenuTreeBuilder {
    pub(super) fn edit_menu(&self) -> Submenu {
        let item = |id: &str, key: &str, role: MenuRole, accelerator: &str| -> MenuNode {
            MenuItem::role(id, self.label(key), role)
                .accelerator(accelerator)
                .into()
        };

        Submenu::new(
            ids::EDIT,
            self.label("edit.label"),
            vec![
                item(ids::UNDO, "edit.undo", MenuRole::Undo, "CommandOrControl+Z"),
                item(ids::REDO, "edit.redo", MenuRole::Redo, "Shift+CommandOrControl+Z"),
                MenuNode::Separator,
                item(ids::CUT, "edit.cut", MenuRole::Cut, "CommandOrControl+X"),
                item(ids::COPY, "edit.copy", MenuRole::Copy, "CommandOrControl+C"),
                item(ids::PASTE, "edit.paste", MenuRole::Paste, "CommandOrControl+V"),
                item(
                    ids::SELECT_ALL,
                    "edit.selectAll",
                    MenuRole::SelectAll,
                    "CommandOrControl+A",
                ),
            ],
        )
    }
}
