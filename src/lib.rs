//! Localized route paths.
//!
//! Translates a route tree authored in a default language into other
//! languages using per-language segment dictionaries, and converts the URL on
//! screen into its equivalent in another language, keeping placeholder values
//! such as `:id` and fixing the language prefix.
//!
//! ```
//! use localized_routes::{Dictionary, LocalizedRoutesSettings, RouteNode, RouteParser, RouteSnapshot};
//!
//! let mut translations = Dictionary::new();
//! translations.add_segment("da", "user", "bruger");
//! translations.add_segment("da", "profile", "profil");
//! let settings = LocalizedRoutesSettings::new("en", &["en", "da"], translations).unwrap();
//! let parser = RouteParser::new(settings);
//!
//! let routes = vec![RouteNode::new("user/:id").with_children(vec![RouteNode::new("profile")])];
//! let danish = parser.translate_routes(&routes, "da");
//! assert_eq!(danish[0].path.as_deref(), Some("bruger/:id"));
//!
//! let english = parser.translate_routes(&routes, "en");
//! let snapshot = RouteSnapshot::from_chain(vec![english[0].clone(), english[0].children()[0].clone()]);
//! assert_eq!(
//!     parser.translate_path_from_string("/user/42/profile", "da", &snapshot),
//!     "/da/bruger/42/profil"
//! );
//! ```

pub mod dictionary;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod path;
pub mod preferences;
pub mod route;
pub mod service;
pub mod settings;

pub use dictionary::{Dictionary, SegmentTranslation, SegmentTranslations};
pub use error::{RoutesError, RoutesResult};
pub use loader::{
    load_dictionary_from_dir, load_routes_from_file, load_settings_from_file,
    load_translations_from_file,
};
pub use matcher::match_url;
pub use parser::RouteParser;
pub use path::{PathArray, normalize_prefix};
pub use preferences::{
    Bootstrap, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, apply_preference,
    bootstrap,
};
pub use route::{RouteNode, RouteSnapshot};
pub use service::{
    InitialLanguage, LANG_STORAGE_KEY, LanguageChange, LocalizedRoutesService, PreferenceWrite,
    ServiceState, lang_from_url,
};
pub use settings::LocalizedRoutesSettings;
