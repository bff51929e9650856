//! Language settings: default language, supported languages and segment translations.

use std::collections::HashSet;

use icu_locale::Locale;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, SegmentTranslation, SegmentTranslations};
use crate::error::{RoutesError, RoutesResult};

/// Immutable configuration supplied once at startup.
///
/// Deserialized from JSON with camelCase keys:
///
/// ```json
/// {
///     "defaultLang": "en",
///     "langs": ["en", "da"],
///     "translations": { "en": {}, "da": { "user": "bruger" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizedRoutesSettings {
    /// Language of the canonical route table. Never shown as a URL prefix.
    pub default_lang: String,
    /// Every language a URL may be translated into, default included.
    pub langs: Vec<String>,
    pub translations: Dictionary,
}

impl Default for LocalizedRoutesSettings {
    fn default() -> Self {
        let mut translations = Dictionary::new();
        translations.with_translations_for_lang("en", SegmentTranslations::new());
        Self {
            default_lang: "en".to_string(),
            langs: vec!["en".to_string()],
            translations,
        }
    }
}

impl LocalizedRoutesSettings {
    /// Create validated settings.
    ///
    /// # Errors
    /// See [`LocalizedRoutesSettings::validate`].
    pub fn new(
        default_lang: &str,
        langs: &[&str],
        translations: Dictionary,
    ) -> RoutesResult<Self> {
        let settings = Self {
            default_lang: default_lang.to_string(),
            langs: langs.iter().map(|lang| lang.to_string()).collect(),
            translations,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every language code is a well-formed locale, that no code
    /// repeats, that the default language is listed, and that no dictionary
    /// key is a route placeholder.
    pub fn validate(&self) -> RoutesResult<()> {
        let mut seen = HashSet::new();
        for code in &self.langs {
            code.parse::<Locale>()
                .map_err(|e| RoutesError::InvalidLanguageCode {
                    code: code.clone(),
                    reason: e.to_string(),
                })?;
            if !seen.insert(code.as_str()) {
                return Err(RoutesError::DuplicateLanguage(code.clone()));
            }
        }

        if !self.is_supported(&self.default_lang) {
            return Err(RoutesError::DefaultLanguageNotListed(
                self.default_lang.clone(),
            ));
        }

        for lang in self.translations.langs() {
            let Some(translations) = self.translations.translations_for(lang) else {
                continue;
            };
            if let Some(key) = translations
                .get_segments()
                .keys()
                .find(|key| key.starts_with(':') || key.contains('/'))
            {
                return Err(RoutesError::InvalidDictionary {
                    lang: lang.to_string(),
                    reason: format!("'{key}' is not a plain path segment"),
                });
            }
            if !self.is_supported(lang) {
                tracing::warn!(lang, "Translations provided for a language that is not in langs");
            }
        }

        Ok(())
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.langs.iter().any(|lang| lang == code)
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default_lang == code
    }

    /// The language prefix shown in URLs: empty for the default language.
    pub fn url_prefix<'a>(&self, lang: &'a str) -> &'a str {
        if self.is_default(lang) { "" } else { lang }
    }

    pub fn translate_segment(&self, segment: &str, lang: &str) -> SegmentTranslation {
        self.translations.translate_segment(segment, lang)
    }
}
