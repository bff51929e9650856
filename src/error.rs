use std::path::PathBuf;

use thiserror::Error;

/// Error types for configuration loading, language changes and preference storage.
///
/// Route and URL translation never produce errors: a segment without a
/// dictionary entry is kept as it is.
#[derive(Debug, Error)]
pub enum RoutesError {
    /// A file or directory could not be read or written
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A file did not contain valid JSON for the expected shape
    #[error("failed to parse JSON from '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A language code is not a well-formed locale identifier
    #[error("invalid language code '{code}': {reason}")]
    InvalidLanguageCode { code: String, reason: String },
    /// The default language must be one of the configured languages
    #[error("default language '{0}' is not listed in langs")]
    DefaultLanguageNotListed(String),
    /// A language appears more than once in the configured languages
    #[error("language '{0}' is listed more than once")]
    DuplicateLanguage(String),
    /// A language change was requested for a language that is not configured
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
    /// Segment translations for a language are malformed
    #[error("invalid segment translations for '{lang}': {reason}")]
    InvalidDictionary { lang: String, reason: String },
    /// The preference store failed
    #[error("preference store error: {0}")]
    Store(String),
}

/// Result type for fallible operations in this crate
pub type RoutesResult<T> = Result<T, RoutesError>;
