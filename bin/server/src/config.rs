//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! `__` as the separator, e.g. `SESSION__SECRET` or `GATE__LANDING_PATH`.
//!
//! See [`GateConfig`](rolegate_access::GateConfig) for the route gate and
//! [`OidcConfig`](rolegate_access::OidcConfig) for OIDC authentication.

use axum_extra::extract::cookie::Key;
use chrono::Duration as ChronoDuration;
use rolegate_access::{GateConfig, OidcConfig};
use serde::Deserialize;
use std::fmt;

use crate::error::StartupError;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Route gate configuration.
    #[serde(default)]
    pub gate: GateConfig,

    /// Session cookie configuration.
    pub session: SessionConfig,

    /// OIDC authentication configuration.
    pub oidc: OidcConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Session cookie configuration.
#[derive(Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session cookies. Must be at least 64 bytes.
    pub secret: String,

    /// Session lifetime in minutes. Claims stop identifying the user after this.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_minutes() -> i64 {
    60
}

fn default_secure_cookies() -> bool {
    true
}

/// Minimum secret length accepted for signing cookies.
pub const MIN_SECRET_LEN: usize = 64;

/// Longest accepted session lifetime: 30 days.
pub const MAX_SESSION_MINUTES: i64 = 30 * 24 * 60;

impl SessionConfig {
    /// Creates a session configuration with default duration and secure cookies.
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            duration_minutes: default_session_duration_minutes(),
            secure_cookies: default_secure_cookies(),
        }
    }

    /// Returns the session lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error unless the duration is between one minute and
    /// [`MAX_SESSION_MINUTES`].
    pub fn session_duration(&self) -> Result<ChronoDuration, StartupError> {
        let minutes = self.duration_minutes;
        if !(1..=MAX_SESSION_MINUTES).contains(&minutes) {
            return Err(StartupError::InvalidSessionDuration { minutes });
        }
        Ok(ChronoDuration::minutes(minutes))
    }

    /// Derives the cookie signing key from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is shorter than [`MIN_SECRET_LEN`] bytes.
    pub fn cookie_key(&self) -> Result<Key, StartupError> {
        let len = self.secret.len();
        if len < MIN_SECRET_LEN {
            return Err(StartupError::SessionSecretTooShort { len });
        }
        Key::try_from(self.secret.as_bytes())
            .map_err(|_| StartupError::SessionSecretTooShort { len })
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("duration_minutes", &self.duration_minutes)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
