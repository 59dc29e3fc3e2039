//! Stable menu identifiers.
//!
//! Native menu implementations map clicks back to actions through these ids,
//! so they must not depend on labels or on the current language.

#![allow(missing_docs)]

use oystr_node::{Network, NodeType};

use crate::state::{LanguageCode, ViewId};

pub const APP: &str = "app";
pub const ABOUT: &str = "app.about";
pub const CHECK_FOR_UPDATES: &str = "app.check_for_updates";
pub const CHECK_FOR_NODE_UPDATES: &str = "app.check_for_node_updates";
pub const SERVICES: &str = "app.services";
pub const HIDE: &str = "app.hide";
pub const HIDE_OTHERS: &str = "app.hide_others";
pub const SHOW_ALL: &str = "app.show_all";
pub const QUIT: &str = "app.quit";

pub const FILE: &str = "file";
pub const NEW_ACCOUNT: &str = "file.new_account";
pub const IMPORT_PRESALE: &str = "file.import_presale";
pub const BACKUP: &str = "file.backup";
pub const BACKUP_KEYSTORE: &str = "file.backup.keystore";
pub const BACKUP_USER_DATA: &str = "file.backup.user_data";
pub const SWARM_UPLOAD: &str = "file.swarm_upload";

pub const EDIT: &str = "edit";
pub const UNDO: &str = "edit.undo";
pub const REDO: &str = "edit.redo";
pub const CUT: &str = "edit.cut";
pub const COPY: &str = "edit.copy";
pub const PASTE: &str = "edit.paste";
pub const SELECT_ALL: &str = "edit.select_all";

pub const VIEW: &str = "view";
pub const FULLSCREEN: &str = "view.fullscreen";
pub const LANGUAGES: &str = "view.languages";
pub const LANGUAGE_DEFAULT: &str = "view.languages.default";

pub const DEVELOP: &str = "develop";
pub const DEVTOOLS: &str = "develop.devtools";
pub const SHELL_DEVTOOLS: &str = "develop.devtools.shell";
pub const OPEN_REMIX: &str = "develop.open_remix";
pub const RUN_TESTS: &str = "develop.run_tests";
pub const LOG_FILES: &str = "develop.log_files";
pub const NODE_MENU: &str = "develop.node";
pub const NETWORK_MENU: &str = "develop.network";

pub const WINDOW: &str = "window";
pub const MINIMIZE: &str = "window.minimize";
pub const CLOSE: &str = "window.close";
pub const TO_FRONT: &str = "window.to_front";

pub const HELP: &str = "help";
pub const HELP_ABOUT: &str = "help.about";
pub const HELP_CHECK_FOR_UPDATES: &str = "help.check_for_updates";
pub const WIKI: &str = "help.wiki";
pub const CHAT: &str = "help.chat";
pub const REPORT_BUG: &str = "help.report_bug";

/// Id of the item selecting `code`.
#[must_use]
pub fn language_id(code: &LanguageCode) -> String {
    format!("language:{code}")
}

/// Id of the devtools item for a content view.
#[must_use]
pub fn view_devtools_id(view: &ViewId) -> String {
    format!("devtools:{view}")
}

/// Id of the item switching to `node`.
#[must_use]
pub fn node_id(node: NodeType) -> String {
    format!("node:{node}")
}

/// Id of the item switching to `network`.
#[must_use]
pub fn network_id(network: Network) -> String {
    format!("network:{network}")
}
