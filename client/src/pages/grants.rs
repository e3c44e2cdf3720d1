//! Grants list: select, create, edit, and delete grants.
//!
//! SYSTEM CONTEXT
//! ==============
//! Selecting a grant stores its id and title in the session and opens the
//! expenses page. Expense, rule, role, and overview pages are scoped to the
//! selected grant.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{
    delete_row, dialog_mode, draft_setter, draft_text, load_collection, loading, rows, save_draft,
};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::{TextAreaField, TextField};
use crate::components::modal::Modal;
use crate::components::toast_host::notify_error;
use crate::net::api::{ApiClient, Resource};
use crate::net::error::ApiError;
use crate::net::types::Grant;
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::{install_pending_navigation, install_signed_out_redirect};
use crate::util::form::{date_input_to_datetime, display_date, format_amount, parse_amount};

fn columns() -> Vec<Column<Grant>> {
    vec![
        Column::new("Title", |g: &Grant| g.title.clone()),
        Column::new("Agency", |g: &Grant| g.funding_agency.clone()),
        Column::new("Start", |g: &Grant| display_date(&g.start_date)),
        Column::new("End", |g: &Grant| display_date(&g.end_date)),
        Column::new("Total", |g: &Grant| format_amount(g.total_amount)),
        Column::new("Status", |g: &Grant| g.status.clone()),
    ]
}

#[component]
pub fn GrantsPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let goto = install_pending_navigation(navigate.clone());
    let state = RwSignal::new(ListState::<Grant>::default());
    let amount_text = RwSignal::new(String::new());

    let reload = Callback::new({
        let api = api.clone();
        move |()| load_collection(&api, state)
    });
    install_signed_out_redirect(session.clone(), navigate, move || reload.run(()));

    let on_select = Callback::new({
        let session = session.clone();
        move |id: String| {
            let Some(grant) = state.with_untracked(|s| s.find(&id).cloned()) else {
                return;
            };
            session.select_grant(&id, &grant.title);
            goto.set(Some("/expenses".to_owned()));
        }
    });
    let on_edit = Callback::new(move |id: String| {
        let opened = state.try_update(|s| s.open_edit(&id)).unwrap_or(false);
        if opened {
            let total = state.with_untracked(|s| s.draft().map(|g| g.total_amount).unwrap_or_default());
            amount_text.set(total.to_string());
        }
    });
    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_new = move |_| {
        amount_text.set(String::new());
        state.update(|s| s.open_create(Grant::default()));
    };
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));

    let on_save = Callback::new({
        let api = api.clone();
        let session = session.clone();
        move |()| {
            let amount = match parse_amount(&amount_text.get_untracked()) {
                Ok(amount) => amount,
                Err(message) => {
                    notify_error(toasts, message);
                    return;
                }
            };
            state.update(|s| s.edit_draft(|g| g.total_amount = amount));
            let Some((mode, mut grant)) = state.with_untracked(|s| s.draft().cloned().map(|g| (s.dialog.mode(), g)))
            else {
                return;
            };
            grant.start_date = date_input_to_datetime(&grant.start_date);
            grant.end_date = date_input_to_datetime(&grant.end_date);
            let api = api.clone();
            let session = session.clone();
            match (mode, grant.id().map(str::to_owned)) {
                (DialogMode::Edit, Some(id)) => {
                    save_draft(state, toasts, async move { api.replace(&id, &grant).await }, "Grant updated.", reload);
                }
                _ => save_draft(
                    state,
                    toasts,
                    async move {
                        let created = api.create(&grant).await?;
                        if let Some(id) = created.id() {
                            session.select_grant(id, &created.title);
                        }
                        Ok::<_, ApiError>(created)
                    },
                    "Grant created.",
                    reload,
                ),
            }
        }
    });
    let on_confirm_delete = Callback::new({
        let api = api.clone();
        move |()| {
            if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
                delete_row(&api, state, toasts, id, "Grant deleted.");
            }
        }
    });

    let mode = dialog_mode(state);
    let dialog = move || match mode.get() {
        DialogMode::Closed => ().into_any(),
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog
                message="Delete this grant? Its expenses, rules, and roles go with it."
                on_cancel=on_close
                on_confirm=on_confirm_delete
            />
        }
        .into_any(),
        DialogMode::Create | DialogMode::Edit => {
            let title = if mode.get() == DialogMode::Create { "New grant" } else { "Edit grant" };
            view! {
                <Modal title=title on_close=on_close>
                    <TextField
                        label="Title"
                        value=draft_text(state, |g| g.title.clone())
                        on_input=draft_setter(state, |g, v| g.title = v)
                    />
                    <TextField
                        label="Funding agency"
                        value=draft_text(state, |g| g.funding_agency.clone())
                        on_input=draft_setter(state, |g, v| g.funding_agency = v)
                    />
                    <TextField
                        label="Start date"
                        kind="date"
                        value=draft_text(state, |g| display_date(&g.start_date))
                        on_input=draft_setter(state, |g, v| g.start_date = v)
                    />
                    <TextField
                        label="End date"
                        kind="date"
                        value=draft_text(state, |g| display_date(&g.end_date))
                        on_input=draft_setter(state, |g, v| g.end_date = v)
                    />
                    <TextField
                        label="Total amount"
                        value=amount_text
                        on_input=Callback::new(move |v| amount_text.set(v))
                    />
                    <TextField
                        label="Status"
                        value=draft_text(state, |g| g.status.clone())
                        on_input=draft_setter(state, |g, v| g.status = v)
                    />
                    <TextAreaField
                        label="Description"
                        value=draft_text(state, |g| g.description.clone().unwrap_or_default())
                        on_input=draft_setter(state, |g, v: String| g.description = (!v.is_empty()).then_some(v))
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
                <h1>"Grants"</h1>
                <button class="btn btn--primary" on:click=on_new>"New grant"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![
                    RowAction::new("Select", on_select),
                    RowAction::new("Edit", on_edit),
                    RowAction::danger("Delete", on_delete),
                ]
                empty_text="No grants yet."
            />
            {dialog}
        </section>
    }
}
