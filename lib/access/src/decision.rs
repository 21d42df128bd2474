//! The outcome of authorizing one request.

use rolegate_core::RoutePath;
use std::fmt;

/// Whether a request may proceed, or where it must go instead.
///
/// Exactly one decision is produced per request. The gate makes no claim about
/// status codes; the dispatcher picks the transport-level redirect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Forward the request to its handler unchanged.
    Allow,
    /// Stop handling and send the client to this path.
    Redirect(RoutePath),
}

impl Decision {
    /// Creates a redirect decision to the given path.
    #[must_use]
    pub fn redirect(destination: impl Into<RoutePath>) -> Self {
        Self::Redirect(destination.into())
    }

    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the redirect destination, if any.
    #[must_use]
    pub fn destination(&self) -> Option<&RoutePath> {
        match self {
            Self::Allow => None,
            Self::Redirect(destination) => Some(destination),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Redirect(destination) => write!(f, "redirect to {destination}"),
        }
    }
}
