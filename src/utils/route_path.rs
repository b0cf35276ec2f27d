//! Route path composition and validation.
//!
//! Dynamic routes are stored without leading or trailing slashes; the router
//! receives them with a single leading slash.

use url::Url;

/// Errors for paths the router cannot accept.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoutePathError {
    #[error("Empty path segment in '{0}'")]
    EmptySegment(String),

    #[error("Malformed parameter segment '{segment}' in '{path}'")]
    MalformedParameter { path: String, segment: String },

    #[error("Wildcard segment must be last in '{0}'")]
    WildcardNotLast(String),

    #[error("Segment '{segment}' in '{path}' uses unbraced parameter syntax")]
    LegacyParameter { path: String, segment: String },
}

/// Joins a page url and a definition url.
///
/// Both parts are trimmed of slashes, so an empty definition url yields the
/// page's own url:
///
/// ```ignore
/// assert_eq!(compose_route_path("/blog/", "/{slug}/"), "blog/{slug}");
/// assert_eq!(compose_route_path("blog", "/"), "blog");
/// assert_eq!(compose_route_path("", ""), "");
/// ```
pub fn compose_route_path(page_url: &str, definition_url: &str) -> String {
    let suffix = definition_url.trim_matches('/');
    format!("{}/{}", page_url, suffix)
        .trim_matches('/')
        .to_string()
}

/// Checks that a composed path uses only syntax the router understands.
///
/// Parameters must occupy a whole segment (`{name}`), a catch-all
/// (`{*name}`) may only be the last segment, and no segment may be empty.
/// Segments starting with `:` or `*` outside braces are rejected; the
/// router panics on them.
///
/// # Errors
///
/// Returns the first [`RoutePathError`] found.
pub fn validate_route_path(path: &str) -> Result<(), RoutePathError> {
    if path.is_empty() {
        return Ok(());
    }

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(RoutePathError::EmptySegment(path.to_string()));
        }

        if segment.starts_with([':', '*']) {
            return Err(RoutePathError::LegacyParameter {
                path: path.to_string(),
                segment: segment.to_string(),
            });
        }

        if !segment.contains(['{', '}']) {
            continue;
        }

        let name = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| RoutePathError::MalformedParameter {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;

        let (wildcard, name) = match name.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, name),
        };

        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_name {
            return Err(RoutePathError::MalformedParameter {
                path: path.to_string(),
                segment: segment.to_string(),
            });
        }

        if wildcard && index != last {
            return Err(RoutePathError::WildcardNotLast(path.to_string()));
        }
    }

    Ok(())
}

/// Absolute url of a site path for the sitemap.
///
/// Falls back to simple concatenation when `base_url` does not parse.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    let path = path.trim_matches('/');

    Url::parse(&base)
        .and_then(|b| b.join(path))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{}{}", base, path))
}
