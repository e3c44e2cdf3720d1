//! Yes/no confirmation for destructive actions.

use leptos::prelude::*;

use super::modal::Modal;

#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    #[prop(default = "Delete")] confirm_label: &'static str,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal title="Are you sure?" on_close=on_cancel class="dialog--confirm">
            <p class="dialog__message">{message}</p>
            <div class="dialog__actions">
                <button class="btn" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                    {confirm_label}
                </button>
            </div>
        </Modal>
    }
}
