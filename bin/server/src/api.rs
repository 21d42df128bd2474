//! JSON API endpoints.
//!
//! API routes live in the public zone, so the route guard lets them through
//! and each endpoint answers with status codes instead of redirects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rolegate_access::{ADMIN, USER};
use serde::Serialize;

use crate::auth::CurrentClaims;

/// Profile returned by [`current_user`].
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub message: &'static str,
    pub user: UserInfo,
    pub timestamp: DateTime<Utc>,
}

/// The caller's identity as seen by the API.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
}

/// API errors rendered as `{"error": ...}` JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized,
    Forbidden,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// `GET /api/protected/user`: the signed-in user's profile.
pub async fn current_user(
    CurrentClaims(claims): CurrentClaims,
) -> Result<Json<UserPayload>, ApiError> {
    let claims = claims.ok_or(ApiError::Unauthorized)?;
    if !claims.roles().has_any(&[USER, ADMIN]) {
        tracing::debug!(subject = claims.subject(), "API access denied for roles");
        return Err(ApiError::Forbidden);
    }

    Ok(Json(UserPayload {
        message: "Protected user data",
        user: UserInfo {
            id: claims.subject().to_string(),
            name: claims.name().map(str::to_string),
            email: claims.email().map(str::to_string),
            roles: claims.roles().iter().map(|r| r.as_str().to_string()).collect(),
        },
        timestamp: Utc::now(),
    }))
}
