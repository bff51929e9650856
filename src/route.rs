//! Route definitions and matched-route snapshots.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under `data` that holds the canonical (untranslated) path of a route.
pub const ORIGINAL_PATH_KEY: &str = "path";

/// A node in a route tree.
///
/// Mirrors the shape of a host router's route table:
/// `{ path?, redirectTo?, children?, data?, ... }`. Attributes this crate does
/// not know about (component names, guards, lazy-load targets) are kept in
/// `extra` and copied through translation untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteNode {
    pub fn new(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }

    /// A route without a path, used to group children.
    pub fn group(children: Vec<RouteNode>) -> Self {
        Self {
            children: Some(children),
            ..Self::default()
        }
    }

    pub fn redirect(path: &str, redirect_to: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            redirect_to: Some(redirect_to.to_string()),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// Child routes, empty when the node has none.
    pub fn children(&self) -> &[RouteNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// The canonical path recorded when this node was translated.
    pub fn original_path(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get(ORIGINAL_PATH_KEY))
            .and_then(Value::as_str)
    }

    pub fn set_original_path(&mut self, path: &str) {
        self.data
            .get_or_insert_with(Map::new)
            .insert(ORIGINAL_PATH_KEY.to_string(), Value::String(path.to_string()));
    }

    /// Canonical path for reverse lookup, falling back to `path` on nodes that
    /// never went through translation. Empty paths count as absent.
    pub fn canonical_path(&self) -> Option<&str> {
        self.original_path()
            .or(self.path.as_deref())
            .filter(|path| !path.is_empty())
    }

    /// Whether this node has a non-empty `path`.
    pub fn has_path(&self) -> bool {
        self.path.as_deref().is_some_and(|path| !path.is_empty())
    }

    pub fn is_hidden(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|data| data.get("hide"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// One level of the currently active route, as reported by the host router.
///
/// The root snapshot usually has no `route_config`; each level holds the
/// route node that matched and the snapshots of its active children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSnapshot {
    pub route_config: Option<RouteNode>,
    pub children: Vec<RouteSnapshot>,
}

impl RouteSnapshot {
    pub fn root(children: Vec<RouteSnapshot>) -> Self {
        Self {
            route_config: None,
            children,
        }
    }

    pub fn new(route_config: RouteNode) -> Self {
        Self {
            route_config: Some(route_config),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: RouteSnapshot) -> Self {
        self.children.push(child);
        self
    }

    /// Build a root snapshot from a root-to-leaf chain of matched routes.
    pub fn from_chain(chain: Vec<RouteNode>) -> Self {
        let leaf = chain
            .into_iter()
            .rev()
            .fold(None, |child: Option<RouteSnapshot>, node| {
                let snapshot = RouteSnapshot::new(node);
                Some(match child {
                    Some(child) => snapshot.with_child(child),
                    None => snapshot,
                })
            });
        RouteSnapshot::root(leaf.into_iter().collect())
    }

    /// The single active child, if there is exactly one.
    pub fn only_child(&self) -> Option<&RouteSnapshot> {
        match self.children.as_slice() {
            [child] => Some(child),
            _ => None,
        }
    }

    /// Route nodes along the single-child chain, root first.
    pub fn chain(&self) -> Vec<&RouteNode> {
        let mut nodes = Vec::new();
        let mut current = Some(self);
        while let Some(snapshot) = current {
            if let Some(config) = &snapshot.route_config {
                nodes.push(config);
            }
            current = snapshot.only_child();
        }
        nodes
    }
}
