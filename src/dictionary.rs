use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Outcome of looking up a single path segment.
///
/// `no_translation` is set when the dictionary had no entry and `value` is the
/// original segment. Placeholders such as `:id` always come back this way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTranslation {
    pub value: String,
    pub no_translation: bool,
}

impl SegmentTranslation {
    pub fn was_translated(&self) -> bool {
        !self.no_translation
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

/// Segment translations for a single language, keyed by canonical segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentTranslations(pub HashMap<String, String>);

impl SegmentTranslations {
    pub fn new() -> Self {
        SegmentTranslations(HashMap::new())
    }

    pub fn with_segment(&mut self, segment: &str, translation: &str) -> &mut Self {
        self.0.insert(segment.to_owned(), translation.to_owned());
        self
    }

    /// Exact, case-sensitive lookup. An empty translation counts as missing.
    pub fn get_segment(&self, segment: &str) -> Option<&str> {
        self.0
            .get(segment)
            .map(String::as_str)
            .filter(|translation| !translation.is_empty())
    }

    pub fn get_segments(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build the reverse mapping (translated segment -> canonical segment).
    ///
    /// Used to read a localized path back into its canonical form. When two
    /// canonical segments share a translation the result keeps only one of them.
    pub fn reversed(&self) -> SegmentTranslations {
        SegmentTranslations(
            self.0
                .iter()
                .filter(|(_, translation)| !translation.is_empty())
                .map(|(segment, translation)| (translation.clone(), segment.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SegmentTranslations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SegmentTranslations(
            iter.into_iter()
                .map(|(segment, translation)| (segment.into(), translation.into()))
                .collect(),
        )
    }
}

/// Segment translations for every configured language.
// e.g. translations["da"]["user"] = "bruger"
//      translations["de"]["user"] = "benutzer"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(HashMap<String, SegmentTranslations>);

impl Dictionary {
    pub fn new() -> Self {
        Dictionary(HashMap::new())
    }

    pub fn with_translations_for_lang(
        &mut self,
        lang: &str,
        translations: SegmentTranslations,
    ) -> &mut Self {
        self.0.insert(lang.to_owned(), translations);
        self
    }

    pub fn add_segment(&mut self, lang: &str, segment: &str, translation: &str) {
        self.0
            .entry(lang.to_owned())
            .or_default()
            .with_segment(segment, translation);
    }

    pub fn translations_for(&self, lang: &str) -> Option<&SegmentTranslations> {
        self.0.get(lang)
    }

    pub fn langs(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge `other` into this dictionary. Entries from `other` win.
    pub fn merge(&mut self, other: Dictionary) {
        for (lang, translations) in other.0 {
            self.0.entry(lang).or_default().0.extend(translations.0);
        }
    }

    /// Look `segment` up in the translations for `lang`.
    ///
    /// # Arguments
    /// * `segment` - A single path segment, without slashes
    /// * `lang` - The language code to translate into
    ///
    /// # Returns
    /// The translated segment, or the segment itself with `no_translation` set
    /// when the language or the key is unknown.
    pub fn translate_segment(&self, segment: &str, lang: &str) -> SegmentTranslation {
        match self
            .translations_for(lang)
            .and_then(|translations| translations.get_segment(segment))
        {
            Some(value) => SegmentTranslation {
                value: value.to_owned(),
                no_translation: false,
            },
            None => {
                tracing::trace!(segment, lang, "No segment translation, keeping original");
                SegmentTranslation {
                    value: segment.to_owned(),
                    no_translation: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn danish() -> Dictionary {
        let mut da = SegmentTranslations::new();
        da.with_segment("user", "bruger")
            .with_segment("profile", "profil")
            .with_segment("empty", "");
        let mut dictionary = Dictionary::new();
        dictionary.with_translations_for_lang("da", da);
        dictionary
    }

    #[test]
    fn test_translate_known_segment() {
        let translation = danish().translate_segment("user", "da");
        assert_eq!(translation.value, "bruger");
        assert!(translation.was_translated());
    }

    #[test]
    fn test_unknown_segment_passes_through() {
        let translation = danish().translate_segment("competitions", "da");
        assert_eq!(translation.value, "competitions");
        assert!(translation.no_translation);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let translation = danish().translate_segment("User", "da");
        assert_eq!(translation.value, "User");
        assert!(translation.no_translation);
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let translation = danish().translate_segment("user", "de");
        assert_eq!(translation.into_value(), "user");
    }

    #[test]
    fn test_empty_translation_counts_as_missing() {
        let translation = danish().translate_segment("empty", "da");
        assert_eq!(translation.value, "empty");
        assert!(translation.no_translation);
    }

    #[test]
    fn test_placeholder_is_never_translated() {
        let translation = danish().translate_segment(":id", "da");
        assert_eq!(translation.value, ":id");
        assert!(translation.no_translation);
    }

    #[test]
    fn test_reversed() {
        let reversed = danish().translations_for("da").unwrap().reversed();
        assert_eq!(reversed.get_segment("bruger"), Some("user"));
        assert_eq!(reversed.get_segment("profil"), Some("profile"));
        assert_eq!(reversed.len(), 2);
    }

    #[test]
    fn test_merge_overrides_and_extends() {
        let mut dictionary = danish();
        let mut other = Dictionary::new();
        other.add_segment("da", "user", "brugere");
        other.add_segment("de", "user", "benutzer");
        dictionary.merge(other);

        assert_eq!(dictionary.translate_segment("user", "da").value, "brugere");
        assert_eq!(dictionary.translate_segment("profile", "da").value, "profil");
        assert_eq!(dictionary.translate_segment("user", "de").value, "benutzer");
    }

    #[test]
    fn test_deserialize_nested_map() {
        let dictionary: Dictionary =
            serde_json::from_str(r#"{"en": {}, "da": {"user": "bruger"}}"#).unwrap();
        assert!(dictionary.translations_for("en").unwrap().is_empty());
        assert_eq!(dictionary.translate_segment("user", "da").value, "bruger");
    }
}
