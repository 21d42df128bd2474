//! Authentication routes for login, callback, and sign-out.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use time::Duration as TimeDuration;

use super::{
    AppState,
    oidc::AuthState,
    session::{CurrentClaims, removal_cookie, session_cookie},
};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Auth state cookie name (for CSRF protection during OIDC flow).
const AUTH_STATE_COOKIE: &str = "auth_state";

/// Page that renders sign-in failures.
pub const ERROR_PAGE: &str = "/auth/error";

/// Query parameters for the OIDC callback.
///
/// Providers send either `code` and `state`, or `error` when the user
/// declined or the request was rejected.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Expires the auth state cookie once the callback has run, successful or not.
fn auth_state_removal() -> Cookie<'static> {
    Cookie::build((AUTH_STATE_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

/// When a session started at `now` ends.
fn session_expiry(
    now: DateTime<Utc>,
    config: &SessionConfig,
) -> Result<DateTime<Utc>, SessionError> {
    config
        .session_duration()
        .ok()
        .and_then(|duration| now.checked_add_signed(duration))
        .ok_or(SessionError::ExpiryOutOfRange)
}

/// Initiates the OIDC login flow by redirecting to the identity provider.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AuthError> {
    let (auth_url, auth_state) = state.oidc_client.authorization_url();

    let auth_state_json =
        serde_json::to_string(&auth_state).map_err(|e| AuthError::Session(SessionError::Encode {
            details: e.to_string(),
        }))?;

    let cookie = Cookie::build((AUTH_STATE_COOKIE, auth_state_json))
        .path("/")
        .http_only(true)
        .secure(state.site.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(10));

    Ok((jar.add(cookie), Redirect::to(&auth_url)))
}

/// Handles the OIDC callback after the user authenticates with the identity provider.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AuthError> {
    if let Some(error) = query.error {
        return Err(AuthError::Provider {
            error,
            description: query.error_description,
        });
    }
    let code = query.code.ok_or(AuthError::MissingCode)?;

    let auth_state: AuthState = jar
        .get(AUTH_STATE_COOKIE)
        .ok_or(AuthError::MissingAuthState)
        .and_then(|cookie| {
            serde_json::from_str(cookie.value()).map_err(|_| AuthError::InvalidAuthState)
        })?;

    if query.state.as_deref() != Some(auth_state.csrf_token.as_str()) {
        return Err(AuthError::CsrfMismatch);
    }

    let identity = state
        .oidc_client
        .exchange_code(&code, &auth_state)
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    let session_config = &state.site.session_config;
    let expires_at = session_expiry(Utc::now(), session_config).map_err(AuthError::Session)?;
    let claims = identity.into_claims(&state.oidc_client.config().default_roles(), expires_at);

    let session = session_cookie(&claims, session_config).map_err(AuthError::Session)?;

    tracing::info!(
        subject = claims.subject(),
        roles = %claims.roles(),
        "User signed in"
    );

    let landing = state.site.gate.landing_path().clone();
    Ok((
        jar.add(session).add(auth_state_removal()),
        Redirect::to(landing.as_str()),
    ))
}

/// Signs the user out by clearing the session cookie.
pub async fn signout(CurrentClaims(claims): CurrentClaims, jar: SignedCookieJar) -> impl IntoResponse {
    if let Some(claims) = claims {
        tracing::info!(subject = claims.subject(), "User signed out");
    }
    (jar.add(removal_cookie()), Redirect::to("/"))
}

/// Authentication errors.
#[derive(Debug)]
pub enum AuthError {
    /// The provider returned an error instead of a code.
    Provider {
        error: String,
        description: Option<String>,
    },
    MissingCode,
    MissingAuthState,
    InvalidAuthState,
    CsrfMismatch,
    TokenExchange(String),
    Session(SessionError),
}

impl AuthError {
    /// Short code passed to the error page.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Provider { error, .. } if error == "access_denied" => "AccessDenied",
            Self::Provider { .. } | Self::MissingCode | Self::TokenExchange(_) => "OAuthCallback",
            Self::MissingAuthState | Self::InvalidAuthState | Self::CsrfMismatch => "Verification",
            Self::Session(_) => "Configuration",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider {
                error,
                description: Some(description),
            } => write!(f, "provider returned {error}: {description}"),
            Self::Provider { error, .. } => write!(f, "provider returned {error}"),
            Self::MissingCode => write!(f, "callback has no authorization code"),
            Self::MissingAuthState => write!(f, "missing auth state"),
            Self::InvalidAuthState => write!(f, "invalid auth state"),
            Self::CsrfMismatch => write!(f, "CSRF token mismatch"),
            Self::TokenExchange(msg) => write!(f, "token exchange failed: {msg}"),
            Self::Session(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::TokenExchange(_) | Self::Session(_) => {
                tracing::error!(error = %self, "Sign-in failed");
            }
            _ => tracing::warn!(error = %self, "Sign-in rejected"),
        }
        let jar = CookieJar::new().add(auth_state_removal());
        let redirect = Redirect::to(&format!("{ERROR_PAGE}?error={}", self.code()));
        (jar, redirect).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};
    use chrono::Duration;

    #[test]
    fn error_codes() {
        let denied = AuthError::Provider {
            error: "access_denied".to_string(),
            description: None,
        };
        assert_eq!(denied.code(), "AccessDenied");
        let other = AuthError::Provider {
            error: "server_error".to_string(),
            description: Some("try again".to_string()),
        };
        assert_eq!(other.code(), "OAuthCallback");
        assert!(other.to_string().contains("try again"));
        assert_eq!(AuthError::CsrfMismatch.code(), "Verification");
        assert_eq!(AuthError::MissingAuthState.code(), "Verification");
        assert_eq!(
            AuthError::Session(SessionError::Malformed).code(),
            "Configuration"
        );
    }

    #[test]
    fn errors_redirect_to_error_page() {
        let response = AuthError::CsrfMismatch.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/auth/error?error=Verification"
        );
    }

    #[test]
    fn errors_clear_auth_state() {
        let response = AuthError::TokenExchange("boom".to_string()).into_response();
        let set_cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .expect("ascii header");
        assert!(set_cookie.starts_with("auth_state="));
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(set_cookie.contains("Path=/"));
    }

    #[test]
    fn session_expiry_adds_configured_duration() {
        let config = SessionConfig::new("s".repeat(64));
        let now = Utc::now();
        assert_eq!(
            session_expiry(now, &config).ok(),
            Some(now + Duration::minutes(60))
        );
    }

    #[test]
    fn session_expiry_rejects_bad_durations() {
        let mut config = SessionConfig::new("s".repeat(64));
        for minutes in [0, -1, i64::MAX] {
            config.duration_minutes = minutes;
            assert!(matches!(
                session_expiry(Utc::now(), &config),
                Err(SessionError::ExpiryOutOfRange)
            ));
        }

        config.duration_minutes = 60;
        assert!(matches!(
            session_expiry(DateTime::<Utc>::MAX_UTC, &config),
            Err(SessionError::ExpiryOutOfRange)
        ));
    }

    #[test]
    fn callback_query_accepts_provider_error() {
        let query: CallbackQuery =
            serde_json::from_str(r#"{"error":"access_denied","error_description":"nope"}"#)
                .expect("deserialize");
        assert!(query.code.is_none());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
    }
}
