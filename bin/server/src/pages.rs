//! Server-rendered pages.
//!
//! Pages never decide access themselves. The route guard has already run by
//! the time a handler is called; pages only ask the gate what to show.

pub mod admin;
pub mod dashboard;
pub mod error;
pub mod home;
pub mod signin;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use leptos::prelude::*;
use rolegate_access::Claims;

pub use admin::admin_page;
pub use dashboard::dashboard_page;
pub use error::error_page;
pub use home::home_page;
pub use signin::signin_page;

/// Link that starts the OIDC sign-in flow.
pub const LOGIN_LINK: &str = "/api/auth/login";

/// Link that clears the session.
pub const SIGNOUT_LINK: &str = "/api/auth/signout";

/// The site layout around every page.
#[component]
pub(crate) fn Layout(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} | rolegate")}</title>
            </head>
            <body>{children()}</body>
        </html>
    }
}

/// Profile picture, when the provider sent one.
#[component]
pub(crate) fn Avatar(picture: Option<String>, name: String) -> impl IntoView {
    picture.map(|src| view! { <img class="avatar" src=src alt=name width="32" height="32"/> })
}

/// Renders a full page as an HTML document.
pub(crate) fn render(page: impl IntoView) -> Html<String> {
    Html(format!("<!DOCTYPE html>{}", page.to_html()))
}

/// The name shown for a user: their name, or their subject if they have none.
pub(crate) fn display_name(claims: &Claims) -> String {
    claims.name().unwrap_or(claims.subject()).to_string()
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    let page = view! {
        <Layout title="Not found">
            <main>
                <h1>"Page not found"</h1>
                <p><a href="/">"Home"</a></p>
            </main>
        </Layout>
    };
    (StatusCode::NOT_FOUND, render(page))
}
