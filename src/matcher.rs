//! Route matching for a URL path against a (translated) route table.
//!
//! Produces the [`RouteSnapshot`] that URL translation needs when no host
//! router is around to report the active route, e.g. from the command line.
//!
//! - First match wins, in table order
//! - `:name` matches any non-empty segment, `**` matches the rest of the path
//! - Routes without a path group their children and consume nothing
//! - Redirect routes never match
//! - Query strings and fragments are not handled; pass plain paths

use crate::route::{RouteNode, RouteSnapshot};

/// Match `url` against `routes`.
///
/// # Returns
/// A root snapshot holding the matched chain, or `None` if no route matches.
pub fn match_url(routes: &[RouteNode], url: &str) -> Option<RouteSnapshot> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    let matched = match_routes(routes, &segments);
    if matched.is_none() {
        tracing::debug!(url, "No route matched");
    }
    matched.map(|child| RouteSnapshot::root(vec![child]))
}

fn match_routes(routes: &[RouteNode], segments: &[&str]) -> Option<RouteSnapshot> {
    routes.iter().find_map(|route| match_route(route, segments))
}

fn match_route(route: &RouteNode, segments: &[&str]) -> Option<RouteSnapshot> {
    if route.redirect_to.is_some() {
        return None;
    }

    let parts: Vec<&str> = route
        .path
        .as_deref()
        .unwrap_or_default()
        .split('/')
        .filter(|part| !part.is_empty())
        .collect();

    let rest = if parts == ["**"] {
        &segments[segments.len()..]
    } else {
        if parts.len() > segments.len() {
            return None;
        }
        let consumed = parts
            .iter()
            .zip(segments)
            .all(|(part, segment)| part.starts_with(':') || part == segment);
        if !consumed {
            return None;
        }
        &segments[parts.len()..]
    };

    let snapshot = RouteSnapshot::new(route.clone());
    if !route.children().is_empty() {
        if let Some(child) = match_routes(route.children(), rest) {
            return Some(snapshot.with_child(child));
        }
        // a pathless group only matches through one of its children
        return (rest.is_empty() && !parts.is_empty()).then_some(snapshot);
    }
    rest.is_empty().then_some(snapshot)
}
