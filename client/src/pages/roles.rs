//! Role assignments on the selected grant.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{delete_row, dialog_mode, draft_setter, draft_text, load_with, loading, rows, save_draft};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::SelectField;
use crate::components::modal::Modal;
use crate::components::toast_host::notify_error;
use crate::net::api::{ApiClient, PageRequest};
use crate::net::types::{PERMISSIONS, Page, Role, RoleType, User};
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;
use crate::util::task::spawn_request;

fn columns() -> Vec<Column<Role>> {
    vec![
        Column::new("User", |r: &Role| r.user_id.clone()),
        Column::new("Role", |r: &Role| r.role_type.as_str().to_owned()),
        Column::new("Permissions", |r: &Role| r.permissions.join(", ")),
    ]
}

/// `permissions` with `permission` added or removed, keeping catalogue order.
pub fn toggle_permission(permissions: &[String], permission: &str, enabled: bool) -> Vec<String> {
    PERMISSIONS
        .iter()
        .filter(|p| if **p == permission { enabled } else { permissions.iter().any(|have| have.as_str() == **p) })
        .map(|p| (*p).to_owned())
        .collect()
}

#[component]
pub fn RolesPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let state = RwSignal::new(ListState::<Role>::default());
    let users = RwSignal::new(Vec::<User>::new());

    let reload = Callback::new({
        let api = api.clone();
        let session = session.clone();
        move |()| {
            let Some(grant) = session.selected_grant() else {
                state.update(|s| s.finish_load(Ok(Page { data: Vec::new(), count: 0 })));
                return;
            };
            let api = api.clone();
            load_with(state, async move { api.grant_roles(&grant.id).await });
        }
    });
    install_signed_out_redirect(session.clone(), use_navigate(), {
        let api = api.clone();
        move || {
            reload.run(());
            spawn_request(async move {
                if let Ok(page) = api.list::<User>(PageRequest::default()).await {
                    users.set(page.data);
                }
            });
        }
    });

    let on_new = {
        let session = session.clone();
        move |_| {
            let Some(grant) = session.selected_grant() else {
                notify_error(toasts, "Select a grant first.");
                return;
            };
            state.update(|s| s.open_create(Role { grant_id: grant.id, ..Role::default() }));
        }
    };
    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));
    let on_save = Callback::new({
        let api = api.clone();
        move |()| {
            let Some(role) = state.with_untracked(|s| s.draft().cloned()) else {
                return;
            };
            if role.user_id.is_empty() {
                notify_error(toasts, "Choose a user.");
                return;
            }
            let api = api.clone();
            save_draft(
                state,
                toasts,
                async move { api.assign_role(&role.grant_id, &role.user_id, role.role_type, &role.permissions).await },
                "Role assigned.",
                reload,
            );
        }
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
            delete_row(&api, state, toasts, id, "Role removed.");
        }
    });

    let user_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "Choose a user".to_owned())];
        options.extend(users.get().into_iter().map(|u| {
            let label = u.full_name.clone().filter(|n| !n.is_empty()).map_or(u.email.clone(), |n| format!("{n} ({})", u.email));
            (u.id, label)
        }));
        options
    });
    let role_options =
        Signal::derive(|| RoleType::ALL.iter().map(|r| (r.as_str().to_owned(), r.as_str().to_owned())).collect::<Vec<_>>());

    let mode = dialog_mode(state);
    let dialog = move || match mode.get() {
        DialogMode::Closed | DialogMode::Edit => ().into_any(),
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Remove this role assignment?" confirm_label="Remove" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        DialogMode::Create => view! {
            <Modal title="Assign role" on_close=on_close>
                <SelectField
                    label="User"
                    options=user_options
                    value=draft_text(state, |r| r.user_id.clone())
                    on_change=draft_setter(state, |r, v| r.user_id = v)
                />
                <SelectField
                    label="Role"
                    options=role_options
                    value=draft_text(state, |r| r.role_type.as_str().to_owned())
                    on_change=draft_setter(state, |r, v: String| {
                        if let Ok(role_type) = v.parse() {
                            r.role_type = role_type;
                        }
                    })
                />
                <fieldset class="dialog__permissions">
                    <legend>"Permissions"</legend>
                    {PERMISSIONS
                        .iter()
                        .map(|&permission| {
                            let checked = move || {
                                state.with(|s| s.draft().is_some_and(|r| r.permissions.iter().any(|p| p == permission)))
                            };
                            view! {
                                <label class="dialog__check">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |ev| {
                                            let enabled = event_target_checked(&ev);
                                            state.update(|s| s.edit_draft(|r| {
                                                r.permissions = toggle_permission(&r.permissions, permission, enabled);
                                            }));
                                        }
                                    />
                                    {permission}
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Assign"</button>
                </div>
            </Modal>
        }
        .into_any(),
    };

    let grant_title = move || session.selected_grant().map(|g| g.title).unwrap_or_default();

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Roles"</h1>
                <span class="resource-page__scope">{grant_title}</span>
                <button class="btn btn--primary" on:click=on_new>"Assign role"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![RowAction::danger("Remove", on_delete)]
                empty_text="No roles on this grant."
            />
            {dialog}
        </section>
    }
}
