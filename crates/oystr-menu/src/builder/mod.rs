//! Menu tree assembly.
//!
//! Each top-level submenu is built in its own module. Everything that differs
//! by platform goes through a [`SystemSwitch`] table declared here.

mod app;
mod develop;
mod edit;
mod file;
mod help;
mod view;
mod window;

use std::rc::Rc;

use crate::catalog::BinaryCatalog;
use crate::i18n::Translator;
use crate::model::MenuNode;
use crate::platform::{PlatformId, SystemSwitch};
use crate::state::RuntimeState;

/// Translation key prefix shared by all menu labels.
const KEY_PREFIX: &str = "mist.applicationMenu";

/// The application-identity submenu only exists on macOS.
const APP_IDENTITY_MENU: SystemSwitch<bool> =
    SystemSwitch::new(&[(PlatformId::MacOs, true)], Some(false));

/// Platforms without the identity submenu repeat About/updates under Help.
const HELP_APP_ITEMS: SystemSwitch<bool> =
    SystemSwitch::new(&[(PlatformId::MacOs, false)], Some(true));

/// Platforms whose binary manager can switch node implementations.
const NODE_SWITCHING: SystemSwitch<bool> = SystemSwitch::new(
    &[(PlatformId::MacOs, true), (PlatformId::Windows, true)],
    Some(false),
);

const FULLSCREEN_SHORTCUT: SystemSwitch<&str> =
    SystemSwitch::new(&[(PlatformId::MacOs, "Command+Control+F")], Some("F11"));

/// Fixed inputs of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Host platform.
    pub platform: PlatformId,
    /// Application name substituted into identity labels.
    pub app_name: String,
    /// OS locale used by the "Default" language item.
    pub system_locale: String,
}

impl MenuConfig {
    /// Config for `platform` with the default application name.
    pub fn new(platform: PlatformId) -> Self {
        Self {
            platform,
            app_name: "Oystr".to_string(),
            system_locale: "en".to_string(),
        }
    }

    /// Set the application name.
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Set the OS locale.
    #[must_use]
    pub fn with_system_locale(mut self, locale: impl Into<String>) -> Self {
        self.system_locale = locale.into();
        self
    }
}

/// Builds the application menu from a [`RuntimeState`] snapshot.
///
/// Building never performs I/O and never mutates anything: the same config,
/// translator, catalog and state always produce the same tree.
pub struct MenuTreeBuilder {
    config: MenuConfig,
    translator: Rc<dyn Translator>,
    catalog: Rc<dyn BinaryCatalog>,
}

impl MenuTreeBuilder {
    /// Create a builder.
    pub fn new(
        config: MenuConfig,
        translator: Rc<dyn Translator>,
        catalog: Rc<dyn BinaryCatalog>,
    ) -> Self {
        Self {
            config,
            translator,
            catalog,
        }
    }

    /// Builder configuration.
    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Build the full menu bar.
    #[must_use]
    pub fn build(&self, state: &RuntimeState) -> Vec<MenuNode> {
        vec![
            self.app_menu().into(),
            self.file_menu(state).into(),
            self.edit_menu().into(),
            self.view_menu(state).into(),
            self.develop_menu(state).into(),
            self.window_menu().into(),
            self.help_menu().into(),
        ]
    }

    fn platform(&self) -> PlatformId {
        self.config.platform
    }

    /// Translated label for `section.name`.
    fn label(&self, key: &str) -> String {
        self.label_with(key, &[])
    }

    /// Translated label with placeholder substitutions.
    fn label_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translator.translate(&format!("{KEY_PREFIX}.{key}"), args)
    }

    /// Translated label with the application name substituted.
    fn app_label(&self, key: &str) -> String {
        self.label_with(key, &[("app", self.config.app_name.as_str())])
    }
}
