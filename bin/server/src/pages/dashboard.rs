//! Dashboard page.

use axum::extract::State;
use axum::response::Html;
use chrono::Utc;
use leptos::prelude::*;
use rolegate_access::Gate;
use std::sync::Arc;

use super::{Avatar, Layout, SIGNOUT_LINK, display_name, render};
use crate::auth::Authorized;

const ADMIN_PANEL: &str = "/admin";

/// The dashboard: the signed-in user's profile and roles.
pub async fn dashboard_page(
    State(gate): State<Arc<Gate>>,
    Authorized(claims): Authorized,
) -> Html<String> {
    let name = display_name(&claims);
    let email = claims.email().unwrap_or("Not provided").to_string();
    let roles = claims.roles().to_string();
    let picture = claims.picture().map(str::to_string);

    let admin_panel = gate
        .permits(ADMIN_PANEL, Some(&claims), Utc::now())
        .then(|| {
            view! {
                <section>
                    <h2>"Admin Panel"</h2>
                    <a href=ADMIN_PANEL>"Go to Admin Panel"</a>
                </section>
            }
        });

    render(view! {
        <Layout title="Dashboard">
            <nav>
                <Avatar picture=picture name=name.clone()/>
                <span>{name.clone()}</span>
                <a href=SIGNOUT_LINK rel="external">"Sign Out"</a>
            </nav>
            <main class="dashboard-page">
                <h1>"Welcome to your Dashboard"</h1>
                <section>
                    <h2>"User Information"</h2>
                    <dl>
                        <dt>"Name"</dt>
                        <dd>{name}</dd>
                        <dt>"Email"</dt>
                        <dd>{email}</dd>
                        <dt>"Roles"</dt>
                        <dd>{roles}</dd>
                    </dl>
                </section>
                {admin_panel}
            </main>
        </Layout>
    })
}
