//! Sign-in error page.

use axum::extract::Query;
use axum::response::Html;
use leptos::prelude::*;
use serde::Deserialize;

use super::{LOGIN_LINK, Layout, render};

/// Query parameters for the error page.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorQuery {
    error: Option<String>,
}

fn describe(code: &str) -> &'static str {
    match code {
        "AccessDenied" => "You do not have permission to sign in.",
        "Verification" => "The sign-in request expired or was already used.",
        "Configuration" => "There is a problem with the server configuration.",
        _ => "Sign-in could not be completed.",
    }
}

/// Renders a sign-in failure reported by the callback.
pub async fn error_page(Query(query): Query<ErrorQuery>) -> Html<String> {
    let code = query.error.unwrap_or_else(|| "Default".to_string());
    let message = describe(&code);
    render(view! {
        <Layout title="Error">
            <main class="error-page">
                <h1>"Authentication error"</h1>
                <p>{message}</p>
                <p><code>{code}</code></p>
                <p><a href=LOGIN_LINK rel="external">"Try again"</a></p>
            </main>
        </Layout>
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_messages() {
        assert!(describe("AccessDenied").contains("permission"));
        assert!(describe("Verification").contains("expired"));
        assert_eq!(describe("whatever"), describe("Default"));
    }

    #[tokio::test]
    async fn code_is_escaped() {
        let Html(page) = error_page(Query(ErrorQuery {
            error: Some("<script>".to_string()),
        }))
        .await;
        assert!(page.contains("<code>&lt;script&gt;</code>"));
        assert!(!page.contains("<script>"));
    }
}
