//! Route guard middleware and extractors for Axum.
//!
//! [`route_guard`] runs before routing for every request: it classifies the
//! path, reads the session claims and applies the gate's decision, either
//! forwarding the request untouched or answering with a redirect.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::Key;
use chrono::Utc;
use rolegate_access::{Claims, Decision, Gate};
use std::sync::Arc;

use super::session::CurrentClaims;

/// Middleware applying the gate's decision to each request.
///
/// `Allow` forwards to the handler. `Redirect` answers `303 See Other` with the
/// gate's destination and the handler never runs.
pub async fn route_guard(
    State(gate): State<Arc<Gate>>,
    CurrentClaims(claims): CurrentClaims,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let zone = gate.classify(path);

    match gate.decide(zone, claims.as_ref(), Utc::now()) {
        Decision::Allow => next.run(request).await,
        Decision::Redirect(destination) => {
            tracing::debug!(
                path,
                %zone,
                subject = claims.as_ref().map(Claims::subject),
                %destination,
                "Request redirected by route gate"
            );
            Redirect::to(destination.as_str()).into_response()
        }
    }
}

/// Extractor for the claims of a request the gate allows.
///
/// Handlers behind protected routes use this instead of checking roles
/// themselves. It asks the same gate about the request path, so a handler
/// mounted without the middleware still fails closed.
pub struct Authorized(pub Claims);

impl<S> FromRequestParts<S> for Authorized
where
    Arc<Gate>: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = Arc::<Gate>::from_ref(state);
        let Ok(CurrentClaims(claims)) = CurrentClaims::from_request_parts(parts, state).await;

        match gate.evaluate(parts.uri.path(), claims.as_ref(), Utc::now()) {
            Decision::Redirect(destination) => Err(Redirect::to(destination.as_str())),
            Decision::Allow => match claims {
                Some(claims) => Ok(Authorized(claims)),
                None => Err(Redirect::to(gate.sign_in_path().as_str())),
            },
        }
    }
}
