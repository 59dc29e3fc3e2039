//! Translation lookups used for menu labels.

use crate::state::LanguageCode;

/// Source of translated strings.
///
/// Storage of the catalogs lives elsewhere; the menu only needs lookups and
/// the list of supported codes.
pub trait Translator {
    /// Translate `key`, substituting `{name}` placeholders from `args`.
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String;

    /// Supported language codes, in catalog order.
    fn languages(&self) -> Vec<LanguageCode>;

    /// Supported code closest to a system locale such as `de_DE.UTF-8`.
    fn best_match(&self, locale: &str) -> LanguageCode {
        best_match_language(&self.languages(), locale)
    }
}

/// Resolve `locale` against `languages`.
///
/// Tries the full tag, then the primary subtag, then English, then the first
/// non-development catalog.
#[must_use]
pub fn best_match_language(languages: &[LanguageCode], locale: &str) -> LanguageCode {
    let normalized = locale
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-")
        .to_ascii_lowercase();
    let primary = normalized.split('-').next().unwrap_or_default();

    let candidates = || languages.iter().filter(|code| !code.is_dev());

    candidates()
        .find(|code| code.as_str().eq_ignore_ascii_case(&normalized))
        .or_else(|| {
            candidates().find(|code| {
                code.as_str()
                    .split('-')
                    .next()
                    .is_some_and(|p| p.eq_ignore_ascii_case(primary))
            })
        })
        .or_else(|| candidates().find(|code| code.as_str() == "en"))
        .or_else(|| candidates().next())
        .cloned()
        .unwrap_or_default()
}

/// Translator that renders keys verbatim.
///
/// Handy where no catalog is loaded: labels stay unique and stable, and
/// substitutions are appended as `key(name=value)`.
#[derive(Debug, Clone, Default)]
pub struct KeyTranslator {
    languages: Vec<LanguageCode>,
}

impl KeyTranslator {
    /// Translator advertising `languages`.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LanguageCode>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }
}

impl Translator for KeyTranslator {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        if args.is_empty() {
            return key.to_string();
        }
        let rendered: Vec<String> = args
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        format!("{key}({})", rendered.join(","))
    }

    fn languages(&self) -> Vec<LanguageCode> {
        self.languages.clone()
    }
}
