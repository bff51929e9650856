//! Language activation and redirection.
//!
//! The service owns the canonical route table and the live table handed to
//! the host router. Each language change is one synchronous command that
//! returns the next table and, after the initial navigation, the URL to
//! redirect to. The host performs the navigation and the preference write.

use crate::error::{RoutesError, RoutesResult};
use crate::parser::RouteParser;
use crate::path::{PathArray, split_path};
use crate::route::{RouteNode, RouteSnapshot};
use crate::settings::LocalizedRoutesSettings;

/// Storage key of the user's chosen language.
pub const LANG_STORAGE_KEY: &str = "localizeRoutes/lang";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Idle,
    /// The route table for `lang` is being built or looked up
    TranslatingTree { lang: String },
    /// A redirect to `target` was issued and the host has not confirmed it yet
    AwaitingRedirectTarget { lang: String, target: String },
}

/// How the chosen language should be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceWrite {
    /// Store only when nothing is stored yet
    IfAbsent(String),
    /// Overwrite the stored value
    Always(String),
}

/// Outcome of [`LocalizedRoutesService::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialLanguage {
    /// The URL carried a language prefix, which is now active
    FromUrl(String),
    /// No language in the URL; the stored preference decides
    Deferred,
    /// `init` already ran; the current language is returned
    Unchanged(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageChange {
    pub lang: String,
    /// The complete live route table
    pub routes: Vec<RouteNode>,
    /// Whether a table for `lang` had to be built
    pub routes_changed: bool,
    pub redirect_to: Option<String>,
    pub preference: PreferenceWrite,
}

pub struct LocalizedRoutesService {
    parser: RouteParser,
    original_routes: Vec<RouteNode>,
    dynamic_routes: Vec<RouteNode>,
    current_lang: String,
    state: ServiceState,
    initialized: bool,
    initial_navigation: bool,
}

impl LocalizedRoutesService {
    /// Create the service and build the default-language route table.
    pub fn new(settings: LocalizedRoutesSettings, routes: Vec<RouteNode>) -> Self {
        let parser = RouteParser::new(settings);
        let default_lang = parser.settings().default_lang.clone();
        let dynamic_routes = parser.translate_routes(&routes, &default_lang);
        Self {
            parser,
            original_routes: routes,
            dynamic_routes,
            current_lang: default_lang,
            state: ServiceState::Idle,
            initialized: false,
            initial_navigation: true,
        }
    }

    pub fn settings(&self) -> &LocalizedRoutesSettings {
        self.parser.settings()
    }

    pub fn parser(&self) -> &RouteParser {
        &self.parser
    }

    pub fn current_lang(&self) -> &str {
        &self.current_lang
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    /// The live route table, language wrappers first.
    pub fn routes(&self) -> &[RouteNode] {
        &self.dynamic_routes
    }

    pub fn original_routes(&self) -> &[RouteNode] {
        &self.original_routes
    }

    /// Detect the starting language from the first URL.
    ///
    /// Only the first call does anything.
    pub fn init(&mut self, initial_url: &str) -> InitialLanguage {
        if self.initialized {
            return InitialLanguage::Unchanged(self.current_lang.clone());
        }
        self.initialized = true;

        let url = if initial_url.is_empty() { "/" } else { initial_url };
        let path = PathArray::parse(url);
        match path.get(1).filter(|code| self.settings().is_supported(code)) {
            Some(lang) => {
                let lang = lang.to_string();
                tracing::info!(lang = %lang, "Language taken from URL");
                self.current_lang = lang.clone();
                self.localize_routes();
                InitialLanguage::FromUrl(lang)
            }
            None => InitialLanguage::Deferred,
        }
    }

    /// Pick the language from a stored preference, falling back to the default.
    pub fn resolve_stored_language(&self, stored: Option<&str>) -> String {
        match stored {
            Some(lang) if self.settings().is_supported(lang) => lang.to_string(),
            Some(lang) => {
                tracing::warn!(lang, "Ignoring stored language that is not configured");
                self.settings().default_lang.clone()
            }
            None => self.settings().default_lang.clone(),
        }
    }

    /// Activate `lang`.
    ///
    /// # Arguments
    /// * `lang` - The newly chosen language
    /// * `current_url` - The URL on screen
    /// * `snapshot` - The active route for `current_url`
    ///
    /// # Errors
    /// `UnsupportedLanguage` when `lang` is not configured.
    pub fn change_language(
        &mut self,
        lang: &str,
        current_url: &str,
        snapshot: &RouteSnapshot,
    ) -> RoutesResult<LanguageChange> {
        if !self.settings().is_supported(lang) {
            return Err(RoutesError::UnsupportedLanguage(lang.to_string()));
        }

        self.state = ServiceState::TranslatingTree {
            lang: lang.to_string(),
        };
        self.current_lang = lang.to_string();
        let routes_changed = self.localize_routes();

        if self.initial_navigation {
            self.initial_navigation = false;
            self.state = ServiceState::Idle;
            return Ok(LanguageChange {
                lang: lang.to_string(),
                routes: self.dynamic_routes.clone(),
                routes_changed,
                redirect_to: None,
                preference: PreferenceWrite::IfAbsent(lang.to_string()),
            });
        }

        let target = self
            .parser
            .translate_path_from_string(current_url, lang, snapshot);
        tracing::debug!(lang, from = current_url, to = %target, "Redirecting to translated URL");
        self.state = ServiceState::AwaitingRedirectTarget {
            lang: lang.to_string(),
            target: target.clone(),
        };

        Ok(LanguageChange {
            lang: lang.to_string(),
            routes: self.dynamic_routes.clone(),
            routes_changed,
            redirect_to: Some(target),
            preference: PreferenceWrite::Always(lang.to_string()),
        })
    }

    /// The host has navigated to the redirect target.
    pub fn navigation_complete(&mut self) {
        self.state = ServiceState::Idle;
    }

    /// Translate a link path into the current language.
    pub fn translate_route(&self, path: &str, localize: bool) -> String {
        self.parser
            .translate_path_str(path, &self.current_lang, localize)
    }

    pub fn translate_route_segments(&self, path: &[String], localize: bool) -> Vec<String> {
        self.parser
            .translate_path(path, &self.current_lang, localize)
    }

    /// Make sure the live table has routes for the current language.
    ///
    /// Returns `true` when a language wrapper was added.
    fn localize_routes(&mut self) -> bool {
        let lang = self.current_lang.clone();
        if self.settings().is_default(&lang) {
            return false;
        }
        if self
            .dynamic_routes
            .iter()
            .any(|route| is_language_wrapper(route, &lang))
        {
            tracing::debug!(lang = %lang, "Using cached route table");
            return false;
        }

        let mut wrapper = RouteNode::new(&lang)
            .with_data("hide", true)
            .with_children(self.parser.translate_routes(&self.original_routes, &lang));
        wrapper.set_original_path(&lang);
        self.dynamic_routes.insert(0, wrapper);
        tracing::debug!(lang = %lang, routes = self.dynamic_routes.len(), "Built route table");
        true
    }
}

fn is_language_wrapper(route: &RouteNode, lang: &str) -> bool {
    route.path.as_deref() == Some(lang) && route.original_path() == Some(lang)
}

/// First path segment of `url` if it is a configured language.
pub fn lang_from_url<'a>(url: &str, settings: &'a LocalizedRoutesSettings) -> Option<&'a str> {
    let segments = split_path(url);
    let first = segments.get(1)?;
    settings
        .langs
        .iter()
        .find(|lang| *lang == first)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::matcher::match_url;

    fn service() -> LocalizedRoutesService {
        let mut translations = Dictionary::new();
        translations.add_segment("da", "competitions", "konkurrencer");
        translations.add_segment("da", "user", "bruger");
        translations.add_segment("da", "profile", "profil");
        let settings =
            LocalizedRoutesSettings::new("en", &["en", "da", "de"], translations).unwrap();
        let routes = vec![
            RouteNode::new("competitions"),
            RouteNode::new("user/:id").with_children(vec![RouteNode::new("profile")]),
        ];
        LocalizedRoutesService::new(settings, routes)
    }

    fn change(service: &mut LocalizedRoutesService, lang: &str, url: &str) -> LanguageChange {
        let snapshot = match_url(service.routes(), url).unwrap_or_default();
        service.change_language(lang, url, &snapshot).unwrap()
    }

    #[test]
    fn test_initial_table_is_default_translation() {
        let service = service();
        assert_eq!(service.current_lang(), "en");
        assert_eq!(service.routes().len(), 2);
        assert_eq!(service.routes()[1].original_path(), Some("user/:id"));
        assert_eq!(service.state(), &ServiceState::Idle);
    }

    #[test]
    fn test_init_from_url() {
        let mut service = service();
        assert_eq!(
            service.init("/da/bruger/42"),
            InitialLanguage::FromUrl("da".to_string())
        );
        assert_eq!(service.current_lang(), "da");
        assert_eq!(service.routes()[0].path.as_deref(), Some("da"));
        assert!(service.routes()[0].is_hidden());
        assert_eq!(service.routes()[0].original_path(), Some("da"));
        assert_eq!(service.routes()[0].children()[0].path.as_deref(), Some("konkurrencer"));
    }

    #[test]
    fn test_init_without_lang_is_deferred() {
        let mut service = service();
        assert_eq!(service.init(""), InitialLanguage::Deferred);
        assert_eq!(service.routes().len(), 2);
    }

    #[test]
    fn test_init_runs_once() {
        let mut service = service();
        service.init("/da");
        assert_eq!(service.init("/de"), InitialLanguage::Unchanged("da".to_string()));
    }

    #[test]
    fn test_resolve_stored_language() {
        let service = service();
        assert_eq!(service.resolve_stored_language(Some("da")), "da");
        assert_eq!(service.resolve_stored_language(Some("fr")), "en");
        assert_eq!(service.resolve_stored_language(None), "en");
    }

    #[test]
    fn test_initial_navigation_does_not_redirect() {
        let mut service = service();
        service.init("/user/42/profile");
        let change = change(&mut service, "en", "/user/42/profile");

        assert_eq!(change.redirect_to, None);
        assert_eq!(change.preference, PreferenceWrite::IfAbsent("en".to_string()));
        assert!(!change.routes_changed);
        assert_eq!(service.state(), &ServiceState::Idle);
    }

    #[test]
    fn test_change_language_redirects() {
        let mut service = service();
        service.init("/user/42/profile");
        change(&mut service, "en", "/user/42/profile");

        let change = change(&mut service, "da", "/user/42/profile");
        assert!(change.routes_changed);
        assert_eq!(change.redirect_to.as_deref(), Some("/da/bruger/42/profil"));
        assert_eq!(change.preference, PreferenceWrite::Always("da".to_string()));
        assert_eq!(change.routes.len(), 3);
        assert_eq!(
            service.state(),
            &ServiceState::AwaitingRedirectTarget {
                lang: "da".to_string(),
                target: "/da/bruger/42/profil".to_string(),
            }
        );

        service.navigation_complete();
        assert_eq!(service.state(), &ServiceState::Idle);
    }

    #[test]
    fn test_change_back_to_default() {
        let mut service = service();
        service.init("/da/bruger/42/profil");
        change(&mut service, "da", "/da/bruger/42/profil");

        let change = change(&mut service, "en", "/da/bruger/42/profil");
        assert!(!change.routes_changed);
        assert_eq!(change.redirect_to.as_deref(), Some("/user/42/profile"));
    }

    #[test]
    fn test_visited_language_is_cached() {
        let mut service = service();
        service.init("/");
        change(&mut service, "en", "/");
        assert!(change(&mut service, "da", "/").routes_changed);
        assert!(change(&mut service, "en", "/da").redirect_to.is_some());

        let again = change(&mut service, "da", "/");
        assert!(!again.routes_changed);
        assert_eq!(again.redirect_to.as_deref(), Some("/da"));
        assert_eq!(service.routes().len(), 3);
    }

    #[test]
    fn test_newest_language_wrapper_comes_first() {
        let mut service = service();
        service.init("/");
        change(&mut service, "en", "/");
        change(&mut service, "da", "/");
        change(&mut service, "de", "/da");

        let wrappers: Vec<_> = service
            .routes()
            .iter()
            .filter(|route| route.is_hidden())
            .map(|route| route.path.as_deref().unwrap())
            .collect();
        assert_eq!(wrappers, vec!["de", "da"]);
    }

    #[test]
    fn test_unsupported_language() {
        let mut service = service();
        let result = service.change_language("fr", "/", &RouteSnapshot::default());
        assert!(matches!(result, Err(RoutesError::UnsupportedLanguage(lang)) if lang == "fr"));
        assert_eq!(service.current_lang(), "en");
    }

    #[test]
    fn test_translate_route_uses_current_lang() {
        let mut service = service();
        service.init("/da");
        assert_eq!(service.translate_route("/user/profile", true), "/da/bruger/profil");
        assert_eq!(service.translate_route("user", false), "bruger");
        assert_eq!(
            service.translate_route_segments(&["competitions".to_string()], false),
            vec!["konkurrencer"]
        );
    }

    #[test]
    fn test_lang_from_url() {
        let service = service();
        assert_eq!(lang_from_url("/da/bruger", service.settings()), Some("da"));
        assert_eq!(lang_from_url("/user", service.settings()), None);
        assert_eq!(lang_from_url("/", service.settings()), None);
    }
}
