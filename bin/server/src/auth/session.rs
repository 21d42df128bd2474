//! Signed session cookie.
//!
//! The session cookie carries the user's [`Claims`] as base64url-encoded JSON,
//! signed with the server's cookie key. Verification is left to the
//! signed cookie jar; this module only encodes, decodes and normalizes.
//!
//! Anything that prevents reading the cookie (missing, bad signature, bad
//! encoding, blank subject, expired) yields no claims. The request is then
//! treated as unauthenticated rather than rejected.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rolegate_access::Claims;
use std::convert::Infallible;
use time::Duration as TimeDuration;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Encodes claims into a cookie-safe string.
///
/// # Errors
///
/// Returns an error if the claims cannot be serialized.
pub fn encode_claims(claims: &Claims) -> Result<String, SessionError> {
    let json = serde_json::to_vec(claims).map_err(|e| SessionError::Encode {
        details: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes claims from a verified cookie value.
///
/// # Errors
///
/// Returns an error if the value is not base64url JSON claims, or the claims
/// have no subject.
pub fn decode_claims(value: &str) -> Result<Claims, SessionError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| SessionError::Decode {
            details: e.to_string(),
        })?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| SessionError::Decode {
        details: e.to_string(),
    })?;
    if !claims.is_well_formed() {
        return Err(SessionError::Malformed);
    }
    Ok(claims)
}

/// Builds the session cookie for these claims.
///
/// # Errors
///
/// Returns an error if the claims cannot be encoded.
pub fn session_cookie(
    claims: &Claims,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionError> {
    let value = encode_claims(claims)?;
    Ok(Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(config.duration_minutes))
        .build())
}

/// Builds a cookie that clears the session.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

/// Reads the current request's claims from a verified cookie jar.
pub fn claims_from_jar(jar: &SignedCookieJar) -> Option<Claims> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match decode_claims(cookie.value()) {
        Ok(claims) if claims.is_expired_at(Utc::now()) => {
            tracing::debug!(subject = claims.subject(), "Session has expired");
            None
        }
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable session cookie");
            None
        }
    }
}

/// Extractor for the current request's claims.
///
/// Never rejects: `None` means the request is unauthenticated.
pub struct CurrentClaims(pub Option<Claims>);

impl<S> FromRequestParts<S> for CurrentClaims
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(CurrentClaims(claims_from_jar(&jar)))
    }
}
