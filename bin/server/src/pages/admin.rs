//! Admin panel.

use axum::response::Html;
use leptos::prelude::*;

use super::{Avatar, Layout, SIGNOUT_LINK, display_name, render};
use crate::auth::Authorized;

/// The admin panel. Reachable only by administrators.
pub async fn admin_page(Authorized(claims): Authorized) -> Html<String> {
    let name = display_name(&claims);
    let badge = format!("{name} (Admin)");
    let subject = claims.subject().to_string();
    let email = claims.email().unwrap_or("Not provided").to_string();
    let roles = claims.roles().to_string();
    let picture = claims.picture().map(str::to_string);

    render(view! {
        <Layout title="Admin">
            <nav>
                <Avatar picture=picture name=name/>
                <span>{badge}</span>
                <a href="/dashboard">"Dashboard"</a>
                <a href=SIGNOUT_LINK rel="external">"Sign Out"</a>
            </nav>
            <main class="admin-page">
                <h1>"Admin Dashboard"</h1>
                <section>
                    <h2>"User Management"</h2>
                </section>
                <section>
                    <h2>"System Settings"</h2>
                </section>
                <section>
                    <h2>"Analytics"</h2>
                </section>
                <section>
                    <h2>"Admin Information"</h2>
                    <dl>
                        <dt>"ID"</dt>
                        <dd>{subject}</dd>
                        <dt>"Email"</dt>
                        <dd>{email}</dd>
                        <dt>"Roles"</dt>
                        <dd>{roles}</dd>
                    </dl>
                </section>
            </main>
        </Layout>
    })
}
