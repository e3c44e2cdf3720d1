//! Toast rendering plus the helpers pages use to raise toasts.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

/// Queue a toast and schedule its removal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, text: impl Into<String>) {
    let text = text.into();
    let Some(id) = toasts.try_update(|state| state.push(kind, text)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::from_millis(crate::state::toast::TOAST_TTL_MS)).await;
            toasts.update(|state| state.dismiss(id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

pub fn notify_success(toasts: RwSignal<ToastState>, text: impl Into<String>) {
    notify(toasts, ToastKind::Success, text);
}

pub fn notify_error(toasts: RwSignal<ToastState>, text: impl Into<String>) {
    notify(toasts, ToastKind::Error, text);
}

/// Fixed-position stack of active toasts.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.class()>
                                <span class="toast__text">{toast.text}</span>
                                <button
                                    class="toast__close"
                                    aria-label="Dismiss"
                                    on:click=move |_| toasts.update(|state| state.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
