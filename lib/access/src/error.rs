//! Error types for the access crate.
//!
//! Deciding a request never fails. The only fallible operations here are
//! building a zone table and a gate from configuration, which happens once at
//! startup, where `ConfigError` travels inside a rootcause report.

use crate::zone::Zone;
use std::fmt;

/// Errors from building a zone table or gate out of configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A route prefix or redirect target does not start with `/`.
    InvalidPath { path: String },
    /// The same prefix appears twice in the zone table.
    DuplicatePrefix { prefix: String },
    /// A zone name is not one of the known zones.
    UnknownZone { name: String },
    /// A zone rule is not of the form `prefix=zone`.
    MalformedRule { rule: String },
    /// A redirect target classifies into a zone that would redirect again.
    RedirectLoop { path: String, zone: Zone },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { path } => {
                write!(f, "path '{path}' must start with '/'")
            }
            Self::DuplicatePrefix { prefix } => {
                write!(f, "prefix '{prefix}' appears more than once in the zone table")
            }
            Self::UnknownZone { name } => {
                write!(f, "unknown zone '{name}'")
            }
            Self::MalformedRule { rule } => {
                write!(f, "zone rule '{rule}' is not of the form prefix=zone")
            }
            Self::RedirectLoop { path, zone } => {
                write!(f, "redirect target '{path}' is in the {zone} zone and would redirect again")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_path_display() {
        let err = ConfigError::InvalidPath {
            path: "dashboard".to_string(),
        };
        assert!(err.to_string().contains("'dashboard'"));
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn unknown_zone_display() {
        let err = ConfigError::UnknownZone {
            name: "secret".to_string(),
        };
        assert_eq!(err.to_string(), "unknown zone 'secret'");
    }

    #[test]
    fn redirect_loop_display_names_zone() {
        let err = ConfigError::RedirectLoop {
            path: "/admin".to_string(),
            zone: Zone::ProtectedAdmin,
        };
        assert!(err.to_string().contains("/admin"));
        assert!(err.to_string().contains("protected-admin"));
    }
}
