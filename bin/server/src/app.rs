//! Application router.
//!
//! Every route, including the fallback, sits behind [`route_guard`]. Route
//! handlers therefore only run for requests the gate allows.

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::{self, AppState, SiteState, route_guard};
use crate::pages;

/// Routes that need no OIDC client.
fn site_routes() -> Router<SiteState> {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/auth/signin", get(pages::signin_page))
        .route("/auth/error", get(pages::error_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/admin", get(pages::admin_page))
        .route("/api/auth/signout", get(auth::signout))
        .route("/api/protected/user", get(api::current_user))
        .fallback(pages::not_found)
}

fn guarded(routes: Router, site: SiteState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(site, route_guard))
        .layer(TraceLayer::new_for_http())
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let oidc = Router::new()
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .with_state(state.clone());

    let routes = site_routes().with_state(state.site.clone()).merge(oidc);
    guarded(routes, state.site)
}

/// Builds the router without the OIDC endpoints.
pub fn site_router(site: SiteState) -> Router {
    guarded(site_routes().with_state(site.clone()), site)
}
