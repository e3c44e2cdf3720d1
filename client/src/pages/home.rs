//! Overview of the selected grant's funding projection.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify_error;
use crate::net::api::ApiClient;
use crate::net::types::Projection;
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;
use crate::util::form::format_amount;
use crate::util::task::spawn_request;

/// Label/value rows shown for a projection.
pub fn projection_rows(projection: &Projection) -> Vec<(&'static str, String)> {
    vec![
        ("Total funds", format_amount(projection.grant_total_funds)),
        ("Existing expenses", format_amount(projection.existing_expense_amount)),
        ("Projected expenses", format_amount(projection.projected_expense_amount)),
        ("Current remaining", format_amount(projection.grant_current_remaining_funds)),
        ("Projected remaining", format_amount(projection.grant_projected_remaining_funds)),
    ]
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let projection = RwSignal::new(None::<Projection>);
    let grant = RwSignal::new(None::<String>);

    install_signed_out_redirect(session.clone(), use_navigate(), move || {
        let Some(selected) = session.selected_grant() else {
            return;
        };
        grant.set(Some(selected.title));
        spawn_request(async move {
            match api.projection(&selected.id).await {
                Ok(loaded) => projection.set(Some(loaded)),
                Err(e) => notify_error(toasts, format!("Could not load projection: {e}")),
            }
        });
    });

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>{move || grant.get().unwrap_or_else(|| "Overview".to_owned())}</h1>
            </header>
            <Show
                when=move || grant.get().is_some()
                fallback=|| view! { <p class="resource-page__hint">"Select a grant on the " <a href="/grants">"grants page"</a> " first."</p> }
            >
                <dl class="projection">
                    {move || {
                        projection
                            .get()
                            .map(|p| {
                                projection_rows(&p)
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <dt class="projection__label">{label}</dt>
                                        <dd class="projection__value">{value}</dd>
                                    })
                                    .collect_view()
                            })
                    }}
                </dl>
            </Show>
        </section>
    }
}
