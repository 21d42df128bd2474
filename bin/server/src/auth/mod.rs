//! Authentication and route gating for the rolegate server.
//!
//! This module provides:
//! - OIDC sign-in with an external identity provider
//! - Signed session cookies carrying the user's claims
//! - The route guard middleware that applies the gate to every request
//!
//! # Authorization Model
//!
//! Sign-in establishes identity; the session cookie is the only place claims
//! live between requests. Every request is then authorized by the
//! [`Gate`](rolegate_access::Gate) from its path and the cookie's claims,
//! before any handler runs. Handlers and pages never re-check roles on their
//! own; they consume the same gate through [`Authorized`] and
//! [`Gate::permits`](rolegate_access::Gate::permits).

pub mod guard;
pub mod oidc;
pub mod routes;
pub mod session;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rolegate_access::Gate;
use std::sync::Arc;

use crate::config::SessionConfig;

pub use guard::{Authorized, route_guard};
pub use oidc::OidcClient;
pub use routes::{callback, login, signout};
pub use session::CurrentClaims;

/// State shared by the gate, the pages and the session cookie extractors.
#[derive(Clone)]
pub struct SiteState {
    /// The route gate.
    pub gate: Arc<Gate>,
    /// Key used to sign and verify cookies.
    pub cookie_key: Key,
    /// Session configuration.
    pub session_config: Arc<SessionConfig>,
}

impl SiteState {
    /// Creates the site state.
    pub fn new(gate: Gate, cookie_key: Key, session_config: SessionConfig) -> Self {
        Self {
            gate: Arc::new(gate),
            cookie_key,
            session_config: Arc::new(session_config),
        }
    }
}

/// Shared application state: the site state plus the OIDC client.
#[derive(Clone)]
pub struct AppState {
    /// Gate, cookie key and session configuration.
    pub site: SiteState,
    /// OIDC client for authentication.
    pub oidc_client: Arc<OidcClient>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(site: SiteState, oidc_client: OidcClient) -> Self {
        Self {
            site,
            oidc_client: Arc::new(oidc_client),
        }
    }
}

impl FromRef<SiteState> for Key {
    fn from_ref(state: &SiteState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<SiteState> for Arc<Gate> {
    fn from_ref(state: &SiteState) -> Self {
        state.gate.clone()
    }
}

impl FromRef<AppState> for SiteState {
    fn from_ref(state: &AppState) -> Self {
        state.site.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.site.cookie_key.clone()
    }
}

impl FromRef<AppState> for Arc<Gate> {
    fn from_ref(state: &AppState) -> Self {
        state.site.gate.clone()
    }
}
