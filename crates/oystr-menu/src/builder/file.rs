use super::MenuTreeBuilder;
use crate::action::MenuAction;
use crate::ids;
use crate::model::{MenuItem, MenuNode, Submenu};
use crate::paths;
use crate::state::RuntimeState;

impl MenuTreeBuilder {
    pub(super) fn file_menu(&self, state: &RuntimeState) -> Submenu {
        let keystore = paths::keystore(self.platform(), state.node.node);

        let backup = Submenu::new(
            ids::BACKUP,
            self.label("file.backup"),
            vec![
                MenuItem::action(
                    ids::BACKUP_KEYSTORE,
                    self.label("file.backupKeyStore"),
                    MenuAction::BackupKeystore(keystore),
                )
                .into(),
                MenuItem::action(
                    ids::BACKUP_USER_DATA,
                    self.label("file.backupMist"),
                    MenuAction::BackupUserData,
                )
                .into(),
            ],
        );

        Submenu::new(
            ids::FILE,
            self.label("file.label"),
            vec![
                MenuItem::action(
                    ids::NEW_ACCOUNT,
                    self.label("file.newAccount"),
                    MenuAction::NewAccount,
                )
                .accelerator("CommandOrControl+N")
                .into(),
                MenuItem::action(
                    ids::IMPORT_PRESALE,
                    self.label("file.importPresale"),
                    MenuAction::ImportPresale,
                )
                .accelerator("CommandOrControl+I")
                .enabled(state.node.is_primary_network())
                .into(),
                MenuNode::Separator,
                backup.into(),
                MenuNode::Separator,
                MenuItem::action(
                    ids::SWARM_UPLOAD,
                    self.label("file.swarmUpload"),
                    MenuAction::UploadToSwarm,
                )
                .accelerator("Shift+CommandOrControl+U")
                .into(),
            ],
        )
    }
}
