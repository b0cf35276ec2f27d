//! Route definitions declared by controllers and the routes registered from them.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// HTTP verbs a route definition may declare.
pub const SUPPORTED_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// A sub-route a controller wants registered under its owning page.
///
/// `url` is relative to the page url; leading and trailing slashes are
/// insignificant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    pub methods: Vec<String>,
    pub url: String,
    pub action: String,
}

impl RouteDefinition {
    /// Creates a definition; method names are upper-cased.
    pub fn new(methods: &[&str], url: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            methods: methods.iter().map(|m| m.to_ascii_uppercase()).collect(),
            url: url.into(),
            action: action.into(),
        }
    }

    /// Shorthand for a `GET` definition.
    pub fn get(url: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(&["GET"], url, action)
    }

    /// Shorthand for a `POST` definition.
    pub fn post(url: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(&["POST"], url, action)
    }
}

/// A concrete route produced from one (page, definition) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredRoute {
    /// Composed path without leading or trailing slash; empty for the site root.
    pub path: String,
    pub methods: Vec<String>,
    /// Fully qualified controller symbol.
    pub controller: String,
    pub action: String,
    /// Route name, the owning page id.
    pub name: String,
}

impl RegisteredRoute {
    /// Deterministic key identifying this route in the binding side table.
    pub fn key(&self) -> RouteKey {
        RouteKey::of(&self.methods, &self.path, &self.name)
    }

    /// `Controller@action` handler reference.
    pub fn handler(&self) -> String {
        format!("{}@{}", self.controller, self.action)
    }

    /// Router path with a leading slash.
    pub fn router_path(&self) -> String {
        format!("/{}", self.path)
    }
}

/// Hash of a route's identity: method set, path and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteKey(String);

impl RouteKey {
    /// Computes the key. Method order and case do not affect the result.
    pub fn of(methods: &[String], path: &str, name: &str) -> Self {
        let mut methods: Vec<String> = methods.iter().map(|m| m.to_ascii_uppercase()).collect();
        methods.sort();
        methods.dedup();

        let mut hasher = Sha256::new();
        hasher.update(methods.join(",").as_bytes());
        hasher.update(b"\n");
        hasher.update(path.as_bytes());
        hasher.update(b"\n");
        hasher.update(name.as_bytes());

        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
