//! Normalized request paths.
//!
//! Route classification compares paths segment by segment, so every path is
//! reduced to a canonical form first: a leading `/`, no empty segments, and no
//! trailing `/` (except for the root itself). Matching stays case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A request path in canonical form.
///
/// `/admin`, `/admin/` and `//admin` all normalize to `/admin`; the empty
/// string normalizes to `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    /// Normalizes a raw path.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len().max(1));
        for segment in raw.split('/').filter(|s| !s.is_empty()) {
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }
        Self(normalized)
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the canonical path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Iterates over the path segments, excluding the leading empty segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Returns the number of segments. The root has zero.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Returns true if `prefix` covers this path on whole-segment boundaries.
    ///
    /// `/admin` covers `/admin` and `/admin/users` but not `/administrator`.
    /// The root covers every path.
    #[must_use]
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        if prefix.is_root() {
            return true;
        }
        match self.0.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RoutePath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<RoutePath> for String {
    fn from(path: RoutePath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(RoutePath::new("/admin/").as_str(), "/admin");
        assert_eq!(RoutePath::new("/admin"), RoutePath::new("/admin/"));
    }

    #[test]
    fn empty_segments_are_collapsed() {
        assert_eq!(RoutePath::new("//admin///users/").as_str(), "/admin/users");
    }

    #[test]
    fn empty_and_slash_normalize_to_root() {
        assert!(RoutePath::new("").is_root());
        assert!(RoutePath::new("/").is_root());
        assert!(RoutePath::new("///").is_root());
        assert_eq!(RoutePath::default(), RoutePath::root());
    }

    #[test]
    fn missing_leading_slash_is_added() {
        assert_eq!(RoutePath::new("dashboard").as_str(), "/dashboard");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(RoutePath::new("/Admin").as_str(), "/Admin");
        assert_ne!(RoutePath::new("/Admin"), RoutePath::new("/admin"));
    }

    #[test]
    fn starts_with_respects_segment_boundaries() {
        let admin = RoutePath::new("/admin");
        assert!(RoutePath::new("/admin").starts_with(&admin));
        assert!(RoutePath::new("/admin/users/42").starts_with(&admin));
        assert!(!RoutePath::new("/administrator").starts_with(&admin));
        assert!(!RoutePath::new("/dashboard/admin").starts_with(&admin));
    }

    #[test]
    fn root_prefix_covers_everything() {
        let root = RoutePath::root();
        assert!(RoutePath::new("/").starts_with(&root));
        assert!(RoutePath::new("/anything/at/all").starts_with(&root));
    }

    #[test]
    fn depth_counts_segments() {
        assert_eq!(RoutePath::root().depth(), 0);
        assert_eq!(RoutePath::new("/auth").depth(), 1);
        assert_eq!(RoutePath::new("/admin/users/").depth(), 2);
    }

    #[test]
    fn serde_normalizes_on_deserialize() {
        let parsed: RoutePath = serde_json::from_str("\"/dashboard/\"").expect("deserialize");
        assert_eq!(parsed.as_str(), "/dashboard");
        let json = serde_json::to_string(&parsed).expect("serialize");
        assert_eq!(json, "\"/dashboard\"");
    }
}
