//! Home page.

use axum::extract::State;
use axum::response::Html;
use chrono::Utc;
use leptos::prelude::*;
use rolegate_access::Gate;
use std::sync::Arc;

use super::{LOGIN_LINK, Layout, SIGNOUT_LINK, display_name, render};
use crate::auth::CurrentClaims;

/// The home page. Public; offers sign-in or a link onward.
pub async fn home_page(
    State(gate): State<Arc<Gate>>,
    CurrentClaims(claims): CurrentClaims,
) -> Html<String> {
    let landing = gate.landing_path().as_str().to_string();

    let nav = match claims {
        Some(claims) => {
            let greeting = format!("Welcome, {}!", display_name(&claims));
            let dashboard = gate
                .permits(&landing, Some(&claims), Utc::now())
                .then(|| view! { <a href=landing>"Dashboard"</a> });
            view! {
                <span>{greeting}</span>
                {dashboard}
                <a href=SIGNOUT_LINK rel="external">"Sign Out"</a>
            }
            .into_any()
        }
        None => view! { <a href=LOGIN_LINK rel="external" class="cta-button">"Sign In"</a> }.into_any(),
    };

    render(view! {
        <Layout title="Home">
            <nav>{nav}</nav>
            <main class="home-page">
                <h1>"Secure Authentication"</h1>
                <p>"OAuth 2.0 sign-in with role-based access to every route."</p>
            </main>
        </Layout>
    })
}
