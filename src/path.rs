//! Slash-delimited path arrays and the language-prefix normalizer.
//!
//! A URL such as `/da/bruger/42` is held as `["", "da", "bruger", "42"]`.
//! Index 0 is the leading-slash marker, never a real segment. It is either
//! empty, a bare `/`, or a slash fused with the first segment (`"/da"`) once
//! the normalizer has written a prefix into it. The site root is `["", ""]`.

use std::fmt;

use crate::settings::LocalizedRoutesSettings;

/// An ordered sequence of URL segments, see the module docs for the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArray(Vec<String>);

impl PathArray {
    /// Split a path string on `/`.
    pub fn parse(path: &str) -> Self {
        PathArray(split_path(path))
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        PathArray(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn into_segments(self) -> Vec<String> {
        self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// Insert, replace or remove the language prefix for `lang`.
    pub fn normalize_prefix(&mut self, lang: &str, settings: &LocalizedRoutesSettings) {
        normalize_prefix(&mut self.0, lang, settings);
    }

    pub fn join(&self) -> String {
        self.0.join("/")
    }
}

impl fmt::Display for PathArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join())
    }
}

pub(crate) fn split_path(path: &str) -> Vec<String> {
    path.split('/').map(String::from).collect()
}

/// Add, change or remove the language segment at the front of `segments`.
///
/// The prefix is empty for the default language and `lang` otherwise.
///
/// Leading marker `""` or `"/"`:
/// - a language already sits at index 1: replace it, or remove it for the default language
/// - root only (`["", ""]`): the marker becomes `"/" + prefix` and the trailing element goes
/// - otherwise, with a non-empty prefix: the marker becomes `"/" + prefix`
///
/// Leading slash fused with a segment (`"/da"`, `"/user"`):
/// - the segment is a language: the element becomes `"/" + prefix`
/// - otherwise, with a non-empty prefix: the slash is stripped and `"/" + prefix` is
///   inserted in front
///
/// Anything else is left alone.
pub fn normalize_prefix(segments: &mut Vec<String>, lang: &str, settings: &LocalizedRoutesSettings) {
    let prefix = settings.url_prefix(lang);
    let Some(first) = segments.first().cloned() else {
        return;
    };

    if first.is_empty() || first == "/" {
        let has_lang = segments
            .get(1)
            .is_some_and(|segment| settings.is_supported(segment));
        if has_lang {
            if prefix.is_empty() {
                segments.remove(1);
            } else {
                segments[1] = prefix.to_string();
            }
        } else if segments.len() == 2 && segments[1].is_empty() {
            segments[0] = format!("/{prefix}");
            segments.pop();
        } else if !prefix.is_empty() {
            segments[0] = format!("/{prefix}");
        }
    } else if let Some(first_segment) = first.strip_prefix('/') {
        if settings.is_supported(first_segment) {
            segments[0] = format!("/{prefix}");
        } else if !prefix.is_empty() {
            segments[0] = first_segment.to_string();
            segments.insert(0, format!("/{prefix}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn settings() -> LocalizedRoutesSettings {
        LocalizedRoutesSettings::new("en", &["en", "da", "de"], Dictionary::new()).unwrap()
    }

    fn normalized(segments: &[&str], lang: &str) -> Vec<String> {
        let mut segments: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        normalize_prefix(&mut segments, lang, &settings());
        segments
    }

    #[test]
    fn test_parse_and_join() {
        let path = PathArray::parse("/da/bruger/42");
        assert_eq!(path.segments(), &["", "da", "bruger", "42"]);
        assert_eq!(path.get(1), Some("da"));
        assert_eq!(path.to_string(), "/da/bruger/42");
        assert_eq!(PathArray::parse("/").segments(), &["", ""]);
    }

    #[test]
    fn test_replace_existing_lang() {
        assert_eq!(normalized(&["", "da", "user"], "de"), vec!["", "de", "user"]);
        assert_eq!(normalized(&["/", "da", "user"], "de"), vec!["/", "de", "user"]);
    }

    #[test]
    fn test_remove_existing_lang_for_default() {
        assert_eq!(normalized(&["", "da", "user"], "en"), vec!["", "user"]);
    }

    #[test]
    fn test_root_only() {
        assert_eq!(normalized(&["", ""], "da"), vec!["/da"]);
        assert_eq!(normalized(&["", ""], "en"), vec!["/"]);
    }

    #[test]
    fn test_insert_prefix_into_marker() {
        assert_eq!(normalized(&["", "user", "profile"], "da"), vec!["/da", "user", "profile"]);
        assert_eq!(normalized(&["", "user"], "da").join("/"), "/da/user");
    }

    #[test]
    fn test_default_without_prefix_is_unchanged() {
        assert_eq!(normalized(&["", "user", "profile"], "en"), vec!["", "user", "profile"]);
    }

    #[test]
    fn test_fused_lang_segment() {
        assert_eq!(normalized(&["/da", "bruger"], "de"), vec!["/de", "bruger"]);
        assert_eq!(normalized(&["/da", "bruger"], "en"), vec!["/", "bruger"]);
    }

    #[test]
    fn test_fused_plain_segment() {
        assert_eq!(normalized(&["/user", "profile"], "da"), vec!["/da", "user", "profile"]);
        assert_eq!(normalized(&["/user", "profile"], "en"), vec!["/user", "profile"]);
    }

    #[test]
    fn test_other_shapes_untouched() {
        assert_eq!(normalized(&["user", "profile"], "da"), vec!["user", "profile"]);
        assert!(normalized(&[], "da").is_empty());
    }

    #[test]
    fn test_path_array_normalize() {
        let mut path = PathArray::parse("/user/profile");
        path.normalize_prefix("da", &settings());
        assert_eq!(path.join(), "/da/user/profile");
    }
}
