//! Sign-in page.

use axum::response::Html;
use leptos::prelude::*;

use super::{LOGIN_LINK, Layout, render};

/// Sign-in page; starts the OIDC flow.
///
/// Signed-in users never see this: the gate sends them to the landing page.
pub async fn signin_page() -> Html<String> {
    render(view! {
        <Layout title="Sign in">
            <main class="signin-page">
                <h1>"Sign in to your account"</h1>
                <p>"Secure authentication with your identity provider."</p>
                <a href=LOGIN_LINK rel="external" class="signin-button">"Sign in"</a>
            </main>
        </Layout>
    })
}
