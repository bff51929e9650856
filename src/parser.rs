use crate::dictionary::SegmentTranslation;
use crate::path::{PathArray, normalize_prefix, split_path};
use crate::route::{RouteNode, RouteSnapshot};
use crate::settings::LocalizedRoutesSettings;

/// Translates route trees, link paths and live URLs between languages.
///
/// The parser holds no state besides its settings; every call works on its
/// own inputs, so consecutive translations never affect each other.
#[derive(Debug, Clone)]
pub struct RouteParser {
    settings: LocalizedRoutesSettings,
}

/// Working state for one URL translation.
struct UrlWalk {
    /// Translated URL so far. Starts as `[""]`: no segments, prefix slot open.
    output: Vec<String>,
    /// The URL being translated, split on `/`.
    current: Vec<String>,
}

impl RouteParser {
    pub fn new(settings: LocalizedRoutesSettings) -> Self {
        RouteParser { settings }
    }

    pub fn settings(&self) -> &LocalizedRoutesSettings {
        &self.settings
    }

    pub fn translate_segment(&self, segment: &str, lang: &str) -> SegmentTranslation {
        self.settings.translate_segment(segment, lang)
    }

    /// Translate a route tree into `lang`.
    ///
    /// Every node is copied, never modified in place, so the canonical tree
    /// can be translated again into other languages. A node with a path keeps
    /// its canonical path under `data.path`. Redirect targets are translated
    /// too. Order is preserved because routing is first-match-wins.
    ///
    /// # Arguments
    /// * `routes` - The canonical route tree
    /// * `lang` - The language to translate into
    pub fn translate_routes(&self, routes: &[RouteNode], lang: &str) -> Vec<RouteNode> {
        routes
            .iter()
            .map(|route| self.translate_route(route, lang))
            .collect()
    }

    fn translate_route(&self, route: &RouteNode, lang: &str) -> RouteNode {
        let mut translated = route.clone();

        if let Some(path) = route.path.as_deref().filter(|path| !path.is_empty()) {
            translated.set_original_path(path);
            translated.path = Some(self.translate_path_str(path, lang, false));
        }

        if let Some(redirect_to) = route
            .redirect_to
            .as_deref()
            .filter(|redirect_to| !redirect_to.is_empty())
        {
            translated.redirect_to = Some(self.translate_path_str(redirect_to, lang, false));
        }

        translated.children = route
            .children
            .as_deref()
            .filter(|children| !children.is_empty())
            .map(|children| self.translate_routes(children, lang));

        translated
    }

    /// Translate each segment of `path`, optionally fixing the language prefix.
    ///
    /// With `localize` set, a link such as `["", "user", "profile"]` becomes
    /// `["/da", "bruger", "profil"]` in Danish.
    pub fn translate_path(&self, path: &[String], lang: &str, localize: bool) -> Vec<String> {
        if path.is_empty() {
            return Vec::new();
        }
        let mut translated: Vec<String> = path
            .iter()
            .map(|segment| self.translate_segment(segment, lang).into_value())
            .collect();
        if localize {
            normalize_prefix(&mut translated, lang, &self.settings);
        }
        translated
    }

    /// String form of [`RouteParser::translate_path`]: split on `/`, translate, rejoin.
    pub fn translate_path_str(&self, path: &str, lang: &str, localize: bool) -> String {
        self.translate_path(&split_path(path), lang, localize)
            .join("/")
    }

    /// Translate the URL currently on screen into `lang`.
    ///
    /// Walks the active route chain in `snapshot` from the root, translating
    /// each route's canonical path. Placeholder segments (`:id`) take their
    /// value from `current_url` at the same position. The language prefix is
    /// then inserted, replaced or removed.
    ///
    /// # Arguments
    /// * `current_url` - The displayed path, e.g. `/da/bruger/42/profil`
    /// * `lang` - Target language
    /// * `snapshot` - The matched routes for `current_url`, root first
    ///
    /// # Returns
    /// The equivalent URL in `lang`, e.g. `/user/42/profile` for English
    pub fn translate_path_from_string(
        &self,
        current_url: &str,
        lang: &str,
        snapshot: &RouteSnapshot,
    ) -> String {
        if current_url.is_empty() || current_url == "/" {
            return format!("/{}", self.settings.url_prefix(lang));
        }

        let walk = UrlWalk {
            output: vec![String::new()],
            current: split_path(current_url),
        };
        let mut translated = PathArray::from_segments(self.collect_segments(snapshot, lang, walk).output);
        translated.normalize_prefix(lang, &self.settings);

        let url = translated.join();
        tracing::debug!(from = current_url, to = %url, lang, "Translated URL");
        // an empty result is the site root
        if url.is_empty() { "/".to_string() } else { url }
    }

    fn collect_segments(&self, snapshot: &RouteSnapshot, lang: &str, walk: UrlWalk) -> UrlWalk {
        let canonical = snapshot
            .route_config
            .as_ref()
            .and_then(RouteNode::canonical_path);

        let walk = match canonical {
            None => walk,
            Some(path) if path.contains('/') => self.push_grouped_segment(path, lang, walk),
            Some(path) => self.push_segment(path, lang, walk),
        };

        match snapshot.only_child() {
            Some(child) => self.collect_segments(child, lang, walk),
            None => walk,
        }
    }

    /// A route whose canonical path is a single segment, e.g. `competitions` or `:id`.
    fn push_segment(&self, path: &str, lang: &str, mut walk: UrlWalk) -> UrlWalk {
        let translated = self.translate_segment(path, lang).into_value();
        let value = if translated.starts_with(':') {
            live_value(&walk.current, walk.output.len(), &translated)
        } else {
            translated
        };
        walk.output.push(value);
        walk
    }

    /// A route registered as one unit spanning several segments, e.g. `user/:id`.
    ///
    /// The resolved parts stay joined in a single output element, and the
    /// consumed part of the current URL collapses into that element so later
    /// positions still line up.
    fn push_grouped_segment(&self, path: &str, lang: &str, mut walk: UrlWalk) -> UrlWalk {
        let start = walk.output.len();
        let parts: Vec<&str> = path.split('/').collect();
        let grouped = parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let translated = self.translate_segment(part, lang).into_value();
                if translated.starts_with(':') {
                    live_value(&walk.current, start + i, &translated)
                } else {
                    translated
                }
            })
            .collect::<Vec<_>>()
            .join("/");

        if start <= walk.current.len() {
            let end = (start + parts.len()).min(walk.current.len());
            walk.current.splice(start..end, [grouped.clone()]);
        }
        walk.output.push(grouped);
        walk
    }
}

/// The live URL's value at `index`, or the placeholder itself when the URL is shorter.
fn live_value(current: &[String], index: usize, placeholder: &str) -> String {
    current
        .get(index)
        .cloned()
        .unwrap_or_else(|| placeholder.to_string())
}
