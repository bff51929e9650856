use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dictionary::{Dictionary, SegmentTranslations};
use crate::error::{RoutesError, RoutesResult};
use crate::route::RouteNode;
use crate::settings::LocalizedRoutesSettings;

fn read_json<T: DeserializeOwned>(path: &Path) -> RoutesResult<T> {
    let content = fs::read_to_string(path).map_err(|source| RoutesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RoutesError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate settings from a JSON file.
pub fn load_settings_from_file(path: &Path) -> RoutesResult<LocalizedRoutesSettings> {
    let settings: LocalizedRoutesSettings = read_json(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Load a canonical route table from a JSON array of route nodes.
pub fn load_routes_from_file(path: &Path) -> RoutesResult<Vec<RouteNode>> {
    read_json(path)
}

/// Load segment translations for one language from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "user": "bruger",
///     "profile": "profil"
/// }
/// ```
///
/// # Errors
/// - File not found
/// - Invalid JSON, or a root that is not an object
pub fn load_translations_from_file(path: &Path) -> RoutesResult<SegmentTranslations> {
    let json: Value = read_json(path)?;
    let obj = json.as_object().ok_or_else(|| RoutesError::InvalidDictionary {
        lang: path.display().to_string(),
        reason: "root must be an object".to_string(),
    })?;

    let mut translations = SegmentTranslations::new();
    for (segment, value) in obj {
        if segment.starts_with('@') {
            continue;
        }
        match value.as_str() {
            Some(translation) => {
                translations.with_segment(segment, translation);
            }
            None => {
                tracing::warn!(segment = %segment, file = %path.display(), "Translation is not a string, skipping");
            }
        }
    }

    Ok(translations)
}

/// Load all segment translations from a directory of JSON files
///
/// The filename without extension is the language code:
/// `da.json` -> `"da"`, `pt-BR.json` -> `"pt-BR"`. Other files are ignored.
pub fn load_dictionary_from_dir(dir: &Path) -> RoutesResult<Dictionary> {
    let entries = fs::read_dir(dir).map_err(|source| RoutesError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut dictionary = Dictionary::new();
    for entry in entries {
        let path = entry
            .map_err(|source| RoutesError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(lang) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::warn!(file = %path.display(), "Skipping file with a non UTF-8 name");
            continue;
        };

        let translations = load_translations_from_file(&path)?;
        tracing::debug!(lang, segments = translations.len(), "Loaded segment translations");
        dictionary.with_translations_for_lang(lang, translations);
    }

    if dictionary.langs().next().is_none() {
        tracing::warn!(dir = %dir.display(), "No JSON files found");
    }

    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_translations_skips_metadata_and_non_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("da.json");
        fs::write(
            &path,
            r#"{"@metadata": {"authors": ["x"]}, "user": "bruger", "count": 3}"#,
        )
        .unwrap();

        let translations = load_translations_from_file(&path).unwrap();
        assert_eq!(translations.len(), 1);
        assert_eq!(translations.get_segment("user"), Some("bruger"));
    }

    #[test]
    fn test_load_translations_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("da.json");
        fs::write(&path, r#"["user"]"#).unwrap();

        assert!(matches!(
            load_translations_from_file(&path),
            Err(RoutesError::InvalidDictionary { .. })
        ));
    }

    #[test]
    fn test_load_dictionary_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("da.json"), r#"{"user": "bruger"}"#).unwrap();
        fs::write(dir.path().join("de.json"), r#"{"user": "benutzer"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let dictionary = load_dictionary_from_dir(dir.path()).unwrap();
        assert_eq!(dictionary.translate_segment("user", "da").value, "bruger");
        assert_eq!(dictionary.translate_segment("user", "de").value, "benutzer");
        assert_eq!(dictionary.langs().count(), 2);
    }

    #[test]
    fn test_load_dictionary_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_dictionary_from_dir(&dir.path().join("missing"));
        assert!(matches!(result, Err(RoutesError::Io { .. })));
    }

    #[test]
    fn test_load_settings_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"defaultLang": "fr", "langs": ["en"]}"#).unwrap();

        assert!(matches!(
            load_settings_from_file(&path),
            Err(RoutesError::DefaultLanguageNotListed(_))
        ));
    }

    #[test]
    fn test_load_routes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        fs::write(
            &path,
            r#"[{"path": "competitions"}, {"path": "user/:id", "children": [{"path": "profile"}]}]"#,
        )
        .unwrap();

        let routes = load_routes_from_file(&path).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].children()[0].path.as_deref(), Some("profile"));
    }

    #[test]
    fn test_load_routes_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        fs::write(&path, "[{").unwrap();

        assert!(matches!(
            load_routes_from_file(&path),
            Err(RoutesError::Json { .. })
        ));
    }
}
