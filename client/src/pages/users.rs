//! Dashboard accounts: list, create, edit, and delete users.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{
    delete_row, dialog_mode, draft_flag, draft_setter, draft_text, load_collection, loading, rows, save_draft,
};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::{CheckField, TextField};
use crate::components::modal::Modal;
use crate::components::toast_host::notify_error;
use crate::net::api::ApiClient;
use crate::net::types::{NewUser, User, UserUpdate};
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;
use crate::util::form::display_date;
use crate::util::task::spawn_request;

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_owned()
}

fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("Email", |u: &User| u.email.clone()),
        Column::new("Name", |u: &User| u.full_name.clone().unwrap_or_default()),
        Column::new("Active", |u: &User| yes_no(u.is_active)),
        Column::new("Superuser", |u: &User| yes_no(u.is_superuser)),
        Column::new("Created", |u: &User| u.created_at.as_deref().map(display_date).unwrap_or_default()),
    ]
}

/// Body for creating `draft` with `password`.
///
/// # Errors
///
/// Returns a message when the email is blank or the password too short.
pub fn new_user(draft: &User, password: &str) -> Result<NewUser, String> {
    if draft.email.trim().is_empty() {
        return Err("Email is required.".to_owned());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters."));
    }
    Ok(NewUser {
        email: draft.email.trim().to_owned(),
        password: password.to_owned(),
        full_name: draft.full_name.clone().filter(|n| !n.is_empty()),
        is_active: draft.is_active,
        is_superuser: draft.is_superuser,
    })
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let state = RwSignal::new(ListState::<User>::default());
    let password = RwSignal::new(String::new());

    let reload = Callback::new({
        let api = api.clone();
        move |()| load_collection(&api, state)
    });
    install_signed_out_redirect(session, use_navigate(), move || reload.run(()));

    let on_new = move |_| {
        password.set(String::new());
        state.update(|s| s.open_create(User { is_active: true, ..User::default() }));
    };
    let on_edit = Callback::new({
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_request(async move {
                match api.fetch::<User>(&id).await {
                    Ok(fetched) => state.update(|s| {
                        s.upsert(fetched);
                        s.open_edit(&id);
                    }),
                    Err(e) => notify_error(toasts, format!("Could not load user: {e}")),
                }
            });
        }
    });
    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));
    let on_save = Callback::new({
        let api = api.clone();
        move |()| {
            let Some((mode, draft)) = state.with_untracked(|s| s.draft().cloned().map(|u| (s.dialog.mode(), u))) else {
                return;
            };
            let api = api.clone();
            if mode == DialogMode::Edit {
                let update = UserUpdate::from(&draft);
                save_draft(state, toasts, async move { api.update_user(&draft.id, &update).await }, "User updated.", reload);
                return;
            }
            match new_user(&draft, &password.get_untracked()) {
                Ok(body) => save_draft(state, toasts, async move { api.create_user(&body).await }, "User created.", reload),
                Err(message) => notify_error(toasts, message),
            }
        }
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
            delete_row(&api, state, toasts, id, "User deleted.");
        }
    });

    let mode = dialog_mode(state);
    let dialog = move || match mode.get() {
        DialogMode::Closed => ().into_any(),
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Delete this user?" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        DialogMode::Create | DialogMode::Edit => {
            let creating = mode.get() == DialogMode::Create;
            let title = if creating { "New user" } else { "Edit user" };
            view! {
                <Modal title=title on_close=on_close>
                    <TextField
                        label="Email"
                        kind="email"
                        value=draft_text(state, |u| u.email.clone())
                        on_input=draft_setter(state, |u, v| u.email = v)
                    />
                    <TextField
                        label="Full name"
                        value=draft_text(state, |u| u.full_name.clone().unwrap_or_default())
                        on_input=draft_setter(state, |u, v: String| u.full_name = (!v.is_empty()).then_some(v))
                    />
                    {creating.then(|| view! {
                        <TextField
                            label="Password"
                            kind="password"
                            value=password
                            on_input=Callback::new(move |v| password.set(v))
                        />
                    })}
                    <CheckField
                        label="Active"
                        checked=draft_flag(state, |u| u.is_active)
                        on_toggle=draft_setter(state, |u, v| u.is_active = v)
                    />
                    <CheckField
                        label="Superuser"
                        checked=draft_flag(state, |u| u.is_superuser)
                        on_toggle=draft_setter(state, |u, v| u.is_superuser = v)
                    />
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save"</button>
                    </div>
                </Modal>
            }
            .into_any()
        }
    };

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Users"</h1>
                <button class="btn btn--primary" on:click=on_new>"New user"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![RowAction::new("Edit", on_edit), RowAction::danger("Delete", on_delete)]
                empty_text="No users."
            />
            {dialog}
        </section>
    }
}
