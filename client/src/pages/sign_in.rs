//! Sign-in page: OAuth2 password grant against the backend.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::{notify_error, notify_success};
use crate::net::api::ApiClient;
use crate::state::toast::ToastState;
use crate::util::auth::install_pending_navigation;
use crate::util::form::validate_credentials;
use crate::util::task::spawn_request;

/// Route reached after a successful sign-in.
pub const AFTER_SIGN_IN_PATH: &str = "/grants";

#[component]
pub fn SignInPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let goto = install_pending_navigation(use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if let Err(message) = validate_credentials(&email_value, &password_value) {
            notify_error(toasts, message);
            return;
        }
        busy.set(true);
        let api = api.clone();
        spawn_request(async move {
            match api.sign_in(&email_value, &password_value).await {
                Ok(_) => {
                    notify_success(toasts, "Signed in.");
                    goto.set(Some(AFTER_SIGN_IN_PATH.to_owned()));
                }
                Err(e) => notify_error(toasts, format!("Sign-in failed: {e}")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Grant Desk"</h1>
                <p class="login-card__subtitle">"Sign in to manage grant funding"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
