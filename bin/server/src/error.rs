//! Domain error types for server operations.
//!
//! Startup failures are wrapped in a rootcause report by `main`. Request-time
//! failures never surface as errors to the route gate: an unreadable session
//! simply means the request carries no claims.

use std::fmt;

/// Errors from encoding or decoding the session cookie payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Claims could not be serialized.
    Encode { details: String },
    /// Cookie value is not valid base64 or not valid claims JSON.
    Decode { details: String },
    /// Claims decoded but identify no one.
    Malformed,
    /// The session expiry is out of range.
    ExpiryOutOfRange,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode { details } => write!(f, "failed to encode session: {details}"),
            Self::Decode { details } => write!(f, "failed to decode session: {details}"),
            Self::Malformed => write!(f, "session claims have no subject"),
            Self::ExpiryOutOfRange => write!(f, "session expiry is out of range"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors that stop the server from starting.
#[derive(Debug)]
pub enum StartupError {
    /// Configuration could not be loaded from the environment.
    Config { details: String },
    /// The gate configuration is invalid.
    Gate { details: String },
    /// The session secret is too short to sign cookies.
    SessionSecretTooShort { len: usize },
    /// The session lifetime is zero, negative or too long.
    InvalidSessionDuration { minutes: i64 },
    /// OIDC provider discovery failed.
    Oidc { details: String },
    /// The listen address could not be bound.
    Bind { addr: String, details: String },
    /// The server stopped with an I/O error.
    Serve { details: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "failed to load configuration: {details}"),
            Self::Gate { details } => write!(f, "invalid route gate configuration: {details}"),
            Self::SessionSecretTooShort { len } => write!(
                f,
                "session secret is {len} bytes, at least {} required",
                crate::config::MIN_SECRET_LEN
            ),
            Self::InvalidSessionDuration { minutes } => write!(
                f,
                "session duration of {minutes} minutes is outside 1..={}",
                crate::config::MAX_SESSION_MINUTES
            ),
            Self::Oidc { details } => write!(f, "failed to set up OIDC client: {details}"),
            Self::Bind { addr, details } => write!(f, "failed to bind {addr}: {details}"),
            Self::Serve { details } => write!(f, "server error: {details}"),
        }
    }
}

impl std::error::Error for StartupError {}
