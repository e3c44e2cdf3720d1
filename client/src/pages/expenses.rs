//! Expenses recorded against the selected grant.

#[cfg(test)]
#[path = "expenses_test.rs"]
mod expenses_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{delete_row, dialog_mode, draft_setter, draft_text, load_with, loading, rows, save_draft};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::{SelectField, TextField};
use crate::components::modal::Modal;
use crate::components::toast_host::notify_error;
use crate::net::api::{ApiClient, PageRequest};
use crate::net::error::ApiError;
use crate::net::types::{Category, Expense, Page};
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;
use crate::util::form::{date_input_to_datetime, display_date, format_amount, parse_amount};
use crate::util::task::spawn_request;

fn columns() -> Vec<Column<Expense>> {
    vec![
        Column::new("Date", |e: &Expense| display_date(&e.date)),
        Column::new("Description", |e: &Expense| e.description.clone()),
        Column::new("Category", |e: &Expense| e.category.clone()),
        Column::new("Invoice", |e: &Expense| e.invoice_number.clone().unwrap_or_default()),
        Column::new("Amount", |e: &Expense| format_amount(e.amount)),
    ]
}

/// Keep only expenses of `grant_id`.
pub fn for_grant(page: Page<Expense>, grant_id: &str) -> Page<Expense> {
    let data = page.data.into_iter().filter(|e| e.grant_id == grant_id).collect::<Vec<_>>();
    let count = i64::try_from(data.len()).unwrap_or(i64::MAX);
    Page { data, count }
}

#[component]
pub fn ExpensesPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let state = RwSignal::new(ListState::<Expense>::default());
    let categories = RwSignal::new(Vec::<Category>::new());
    let amount_text = RwSignal::new(String::new());

    let reload = Callback::new({
        let api = api.clone();
        let session = session.clone();
        move |()| {
            let Some(grant) = session.selected_grant() else {
                state.update(|s| s.finish_load(Ok(Page { data: Vec::new(), count: 0 })));
                return;
            };
            let api = api.clone();
            load_with(state, async move {
                let page = api.list::<Expense>(PageRequest::default()).await?;
                Ok::<_, ApiError>(for_grant(page, &grant.id))
            });
        }
    });
    install_signed_out_redirect(session.clone(), use_navigate(), {
        let api = api.clone();
        move || {
            reload.run(());
            spawn_request(async move {
                if let Ok(page) = api.list::<Category>(PageRequest::default()).await {
                    categories.set(page.data);
                }
            });
        }
    });

    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));
    let on_new = {
        let session = session.clone();
        move |_| {
            let Some(grant) = session.selected_grant() else {
                notify_error(toasts, "Select a grant first.");
                return;
            };
            amount_text.set(String::new());
            let draft = Expense { grant_id: grant.id, ..Expense::default() };
            state.update(|s| s.open_create(draft));
        }
    };
    let on_save = Callback::new({
        let api = api.clone();
        move |()| {
            let amount = match parse_amount(&amount_text.get_untracked()) {
                Ok(amount) => amount,
                Err(message) => {
                    notify_error(toasts, message);
                    return;
                }
            };
            let Some(mut expense) = state.with_untracked(|s| s.draft().cloned()) else {
                return;
            };
            expense.amount = amount;
            expense.date = date_input_to_datetime(&expense.date);
            let api = api.clone();
            save_draft(state, toasts, async move { api.create(&expense).await }, "Expense recorded.", reload);
        }
    });
    let on_confirm_delete = Callback::new({
        let api = api.clone();
        move |()| {
            if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
                delete_row(&api, state, toasts, id, "Expense deleted.");
            }
        }
    });

    let category_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "Choose a category".to_owned())];
        options.extend(categories.get().into_iter().filter(|c| c.is_active).map(|c| (c.code, c.name)));
        options
    });

    let mode = dialog_mode(state);
    let dialog = move || match mode.get() {
        DialogMode::Closed | DialogMode::Edit => ().into_any(),
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Delete this expense?" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        DialogMode::Create => view! {
            <Modal title="New expense" on_close=on_close>
                <TextField label="Amount" value=amount_text on_input=Callback::new(move |v| amount_text.set(v)) />
                <TextField
                    label="Date"
                    kind="date"
                    value=draft_text(state, |e| display_date(&e.date))
                    on_input=draft_setter(state, |e, v| e.date = v)
                />
                <TextField
                    label="Description"
                    value=draft_text(state, |e| e.description.clone())
                    on_input=draft_setter(state, |e, v| e.description = v)
                />
                <SelectField
                    label="Category"
                    options=category_options
                    value=draft_text(state, |e| e.category.clone())
                    on_change=draft_setter(state, |e, v| e.category = v)
                />
                <TextField
                    label="Invoice number"
                    value=draft_text(state, |e| e.invoice_number.clone().unwrap_or_default())
                    on_input=draft_setter(state, |e, v: String| e.invoice_number = (!v.is_empty()).then_some(v))
                />
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>"Save"</button>
                </div>
            </Modal>
        }
        .into_any(),
    };

    let grant_title = move || session.selected_grant().map(|g| g.title).unwrap_or_default();

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Expenses"</h1>
                <span class="resource-page__scope">{grant_title}</span>
                <button class="btn btn--primary" on:click=on_new>"New expense"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![RowAction::danger("Delete", on_delete)]
                empty_text="No expenses for this grant."
            />
            {dialog}
        </section>
    }
}
