//! Route classification.
//!
//! Every request path falls into exactly one [`Zone`]. The [`ZoneTable`] maps
//! static path prefixes to zones and picks the longest prefix that covers the
//! path on whole-segment boundaries. A path no prefix covers is
//! [`Zone::Public`]; an unmatched path is never an error.

use rolegate_core::RoutePath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Privilege tier of a request path, ordered from least to most restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    /// Open to everyone, signed in or not.
    Public,
    /// Sign-in pages. Signed-in users are sent onward instead.
    AuthFlow,
    /// Requires a signed-in user.
    Protected,
    /// Requires a signed-in user holding the admin role.
    ProtectedAdmin,
}

impl Zone {
    /// All zones in ascending order of restriction.
    pub const ALL: [Zone; 4] = [
        Zone::Public,
        Zone::AuthFlow,
        Zone::Protected,
        Zone::ProtectedAdmin,
    ];

    /// Returns the configuration name of the zone.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::AuthFlow => "auth-flow",
            Self::Protected => "protected",
            Self::ProtectedAdmin => "protected-admin",
        }
    }

    /// Returns true if requests in this zone need an identity.
    #[must_use]
    pub fn requires_identity(&self) -> bool {
        matches!(self, Self::Protected | Self::ProtectedAdmin)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownZone {
                name: s.to_string(),
            })
    }
}

/// One entry of the zone table: paths under `prefix` belong to `zone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRule {
    prefix: RoutePath,
    zone: Zone,
}

impl ZoneRule {
    #[must_use]
    pub fn new(prefix: impl Into<RoutePath>, zone: Zone) -> Self {
        Self {
            prefix: prefix.into(),
            zone,
        }
    }

    /// Parses a rule of the form `/prefix=zone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `=` is missing, the prefix does not start with
    /// `/`, or the zone name is unknown.
    pub fn parse(rule: &str) -> Result<Self, ConfigError> {
        let (prefix, zone) = rule
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedRule {
                rule: rule.to_string(),
            })?;
        let prefix = prefix.trim();
        if !prefix.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                path: prefix.to_string(),
            });
        }
        Ok(Self::new(prefix, zone.trim().parse()?))
    }

    #[must_use]
    pub fn prefix(&self) -> &RoutePath {
        &self.prefix
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }
}

impl fmt::Display for ZoneRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.zone)
    }
}

/// Static prefix-to-zone table.
///
/// Rules are kept deepest prefix first so the first covering rule is the
/// longest match. Prefixes are unique, so at most one rule of any given depth
/// can cover a path and classification is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTable {
    rules: Vec<ZoneRule>,
}

impl ZoneTable {
    /// The table used when none is configured.
    pub const DEFAULT_RULES: &'static str =
        "/auth=auth-flow,/dashboard=protected,/admin=protected-admin";

    /// Builds a table from rules.
    ///
    /// # Errors
    ///
    /// Returns an error if two rules share a prefix.
    pub fn new(rules: impl IntoIterator<Item = ZoneRule>) -> Result<Self, ConfigError> {
        let mut rules: Vec<ZoneRule> = rules.into_iter().collect();
        rules.sort_by(|a, b| {
            b.prefix
                .depth()
                .cmp(&a.prefix.depth())
                .then_with(|| a.prefix.cmp(&b.prefix))
        });
        if let Some(pair) = rules.windows(2).find(|pair| pair[0].prefix == pair[1].prefix) {
            return Err(ConfigError::DuplicatePrefix {
                prefix: pair[0].prefix.to_string(),
            });
        }
        Ok(Self { rules })
    }

    /// Parses a comma-separated list of `prefix=zone` rules.
    ///
    /// Blank entries are ignored, so an empty string yields an empty table in
    /// which every path is public.
    ///
    /// # Errors
    ///
    /// Returns the first rule error, or a duplicate-prefix error.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let rules = raw
            .split(',')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .map(ZoneRule::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// Classifies a raw request path.
    #[must_use]
    pub fn classify(&self, path: &str) -> Zone {
        self.classify_path(&RoutePath::new(path))
    }

    /// Classifies an already-normalized path.
    #[must_use]
    pub fn classify_path(&self, path: &RoutePath) -> Zone {
        self.rules
            .iter()
            .find(|rule| path.starts_with(&rule.prefix))
            .map_or(Zone::Public, |rule| rule.zone)
    }

    /// Returns the rules, deepest prefix first.
    #[must_use]
    pub fn rules(&self) -> &[ZoneRule] {
        &self.rules
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        let mut rules = vec![
            ZoneRule::new("/auth", Zone::AuthFlow),
            ZoneRule::new("/dashboard", Zone::Protected),
            ZoneRule::new("/admin", Zone::ProtectedAdmin),
        ];
        rules.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        Self { rules }
    }
}

impl FromStr for ZoneTable {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ZoneTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<String> = self.rules.iter().map(ToString::to_string).collect();
        f.write_str(&rules.join(","))
    }
}
