//! Header and footer chrome around signed-in pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered once above the router outlet. Chrome is hidden on the sign-in
//! route and whenever no token is stored. The session is re-read each time
//! the path changes, since sign-in, sign-out, and session expiry all navigate.

#[cfg(test)]
#[path = "nav_shell_test.rs"]
mod nav_shell_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::session::Session;
use crate::util::auth::{SIGN_IN_PATH, SessionExpiry, install_expiry_redirect, install_pending_navigation};

/// Header links in display order.
pub static NAV_LINKS: [(&str, &str); 8] = [
    ("/grants", "Grants"),
    ("/home", "Overview"),
    ("/expenses", "Expenses"),
    ("/approvals", "Approvals"),
    ("/categories", "Categories"),
    ("/rules", "Rules"),
    ("/roles", "Roles"),
    ("/users", "Users"),
];

/// Whether header and footer should render for `path`.
pub fn show_chrome(path: &str, signed_in: bool) -> bool {
    signed_in && path != SIGN_IN_PATH
}

/// CSS class for a header link, marking the active route.
pub fn link_class(href: &str, path: &str) -> &'static str {
    if path == href || path.starts_with(&format!("{href}/")) {
        "nav-shell__link nav-shell__link--active"
    } else {
        "nav-shell__link"
    }
}

#[component]
pub fn NavHeader() -> impl IntoView {
    let session = expect_context::<Session>();
    let location = use_location();
    let navigate = use_navigate();
    let goto = install_pending_navigation(navigate.clone());
    install_expiry_redirect(expect_context::<SessionExpiry>(), navigate);

    // Storage is only readable after hydration; render nothing until then.
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    let visible = {
        let session = session.clone();
        move || mounted.get() && show_chrome(&location.pathname.get(), session.is_signed_in())
    };
    let grant_title = {
        let session = session.clone();
        move || {
            location.pathname.track();
            session.selected_grant().map(|grant| grant.title)
        }
    };
    let on_sign_out = move |_| {
        session.sign_out();
        goto.set(Some(SIGN_IN_PATH.to_owned()));
    };

    view! {
        <Show when=visible>
            <header class="nav-shell">
                <a class="nav-shell__brand" href="/grants">"Grant Desk"</a>
                <nav class="nav-shell__links">
                    {NAV_LINKS
                        .iter()
                        .map(|&(href, label)| {
                            let class = move || link_class(href, &location.pathname.get());
                            view! { <a class=class href=href>{label}</a> }
                        })
                        .collect_view()}
                </nav>
                <span class="nav-shell__grant">
                    {
                        let grant_title = grant_title.clone();
                        move || grant_title().unwrap_or_else(|| "No grant selected".to_owned())
                    }
                </span>
                <button class="btn nav-shell__sign-out" on:click=on_sign_out.clone()>
                    "Sign out"
                </button>
            </header>
        </Show>
    }
}

#[component]
pub fn NavFooter() -> impl IntoView {
    let session = expect_context::<Session>();
    let location = use_location();
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    view! {
        <Show when=move || mounted.get() && show_chrome(&location.pathname.get(), session.is_signed_in())>
            <footer class="nav-shell__footer">"Grant funding dashboard"</footer>
        </Show>
    }
}
