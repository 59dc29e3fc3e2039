//! Built-in English menu labels.
//!
//! The interface ships the full translation catalogs; the shell only needs
//! the application-menu strings, so the English ones are compiled in and
//! every other language falls back to them.

use std::collections::HashMap;

use oystr_menu::{LanguageCode, Translator};

/// Catalogs the interface ships, in catalog order.
const LANGUAGES: [&str; 9] = ["dev", "en", "de", "es", "fr", "ja", "ko", "pt-BR", "zh-TW"];

const ENGLISH: &[(&str, &str)] = &[
    ("app.label", "{app}"),
    ("app.about", "About {app}"),
    ("app.checkForUpdates", "Check for updates..."),
    ("app.checkForNodeUpdates", "Check for node updates..."),
    ("app.services", "Services"),
    ("app.hide", "Hide {app}"),
    ("app.hideOthers", "Hide others"),
    ("app.showAll", "Show all"),
    ("app.quit", "Quit {app}"),
    ("file.label", "File"),
    ("file.newAccount", "New account"),
    ("file.importPresale", "Import accounts"),
    ("file.backup", "Backup"),
    ("file.backupKeyStore", "Accounts"),
    ("file.backupMist", "Application data"),
    ("file.swarmUpload", "Upload to Swarm..."),
    ("edit.label", "Edit"),
    ("edit.undo", "Undo"),
    ("edit.redo", "Redo"),
    ("edit.cut", "Cut"),
    ("edit.copy", "Copy"),
    ("edit.paste", "Paste"),
    ("edit.selectAll", "Select all"),
    ("view.label", "View"),
    ("view.fullscreen", "Toggle full screen"),
    ("view.languages", "Language"),
    ("view.default", "Default"),
    ("view.langCodes.de", "Deutsch"),
    ("view.langCodes.en", "English"),
    ("view.langCodes.es", "Español"),
    ("view.langCodes.fr", "Français"),
    ("view.langCodes.ja", "日本語"),
    ("view.langCodes.ko", "한국어"),
    ("view.langCodes.pt-BR", "Português (Brasil)"),
    ("view.langCodes.zh-TW", "繁體中文"),
    ("develop.label", "Develop"),
    ("develop.devTools", "Toggle developer tools"),
    ("develop.devToolsMistUI", "Oystr UI"),
    ("develop.devToolsWalletUI", "Wallet UI"),
    ("develop.devToolsWebview", "{webview}"),
    ("develop.openRemix", "Open Remix IDE"),
    ("develop.runTests", "Run tests"),
    ("develop.logFiles", "Show node log"),
    ("develop.externalNode", "using external node"),
    ("develop.ethereumNode", "Node"),
    ("develop.network", "Network"),
    ("develop.mainNetwork", "Main network"),
    ("develop.testNetwork", "Test network"),
    ("window.label", "Window"),
    ("window.minimize", "Minimize"),
    ("window.close", "Close"),
    ("window.toFront", "Bring all to front"),
    ("help.label", "Help"),
    ("help.mistWiki", "Troubleshooting and help"),
    ("help.gitter", "Chat"),
    ("help.reportBug", "Report an issue on GitHub"),
];

/// Prefix of the application-menu keys.
const MENU_PREFIX: &str = "mist.applicationMenu.";

/// English labels for the application menu.
#[derive(Debug, Clone)]
pub struct EnglishLabels {
    strings: HashMap<&'static str, &'static str>,
}

impl Default for EnglishLabels {
    fn default() -> Self {
        Self {
            strings: ENGLISH.iter().copied().collect(),
        }
    }
}

impl EnglishLabels {
    /// Load the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Translator for EnglishLabels {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        let short = key.strip_prefix(MENU_PREFIX).unwrap_or(key);
        let Some(template) = self.strings.get(short) else {
            tracing::debug!(key, "Missing label");
            return key.to_string();
        };

        args.iter()
            .fold((*template).to_string(), |label, (name, value)| {
                label.replace(&format!("{{{name}}}"), value)
            })
    }

    fn languages(&self) -> Vec<LanguageCode> {
        LANGUAGES.iter().copied().map(LanguageCode::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_placeholders() {
        let labels = EnglishLabels::new();
        assert_eq!(
            labels.translate("mist.applicationMenu.app.quit", &[("app", "Oystr")]),
            "Quit Oystr"
        );
        assert_eq!(
            labels.translate(
                "mist.applicationMenu.develop.devToolsWebview",
                &[("webview", "Wallet")]
            ),
            "Wallet"
        );
    }

    #[test]
    fn test_unknown_key_renders_key() {
        let labels = EnglishLabels::new();
        assert_eq!(labels.translate("mist.nope", &[]), "mist.nope");
    }

    #[test]
    fn test_every_language_has_a_name() {
        let labels = EnglishLabels::new();
        for code in labels.languages().iter().filter(|code| !code.is_dev()) {
            let key = format!("{MENU_PREFIX}view.langCodes.{code}");
            assert_ne!(labels.translate(&key, &[]), key);
        }
    }
}
