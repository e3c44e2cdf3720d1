//! Expense approvals: decide pending expenses and review past decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two lists share the page. Approving or rejecting a pending expense posts an
//! approval, drops the expense from the pending list, and appends the new
//! approval to the decisions list.

#[cfg(test)]
#[path = "approvals_test.rs"]
mod approvals_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{delete_row, dialog_mode, load_collection, load_with, loading, rows};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::toast_host::{notify_error, notify_success};
use crate::net::api::{ApiClient, PageRequest};
use crate::net::types::{Approval, ApprovalStatus, Expense};
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::install_signed_out_redirect;
use crate::util::form::{display_date, format_amount};
use crate::util::task::spawn_request;

fn pending_columns() -> Vec<Column<Expense>> {
    vec![
        Column::new("Date", |e: &Expense| display_date(&e.date)),
        Column::new("Description", |e: &Expense| e.description.clone()),
        Column::new("Category", |e: &Expense| e.category.clone()),
        Column::new("Amount", |e: &Expense| format_amount(e.amount)),
    ]
}

fn approval_columns() -> Vec<Column<Approval>> {
    vec![
        Column::new("Expense", |a: &Approval| a.expense_id.clone().unwrap_or_default()),
        Column::new("Status", |a: &Approval| a.status.as_str().to_owned()),
        Column::new("Comments", |a: &Approval| a.comments.clone().unwrap_or_default()),
        Column::new("Decided", |a: &Approval| a.created_at.as_deref().map(display_date).unwrap_or_default()),
    ]
}

/// Approval body for a decision on `expense_id`.
pub fn decision(expense_id: &str, status: ApprovalStatus, comments: &str) -> Approval {
    let comments = comments.trim();
    Approval {
        expense_id: Some(expense_id.to_owned()),
        status,
        comments: (!comments.is_empty()).then(|| comments.to_owned()),
        ..Approval::default()
    }
}

#[component]
pub fn ApprovalsPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let pending = RwSignal::new(ListState::<Expense>::default());
    let approvals = RwSignal::new(ListState::<Approval>::default());
    let comments = RwSignal::new(String::new());

    install_signed_out_redirect(session, use_navigate(), {
        let api = api.clone();
        move || {
            let pending_api = api.clone();
            load_with(pending, async move { pending_api.pending_expenses(PageRequest::default()).await });
            load_collection(&api, approvals);
        }
    });

    let decide = {
        let api = api.clone();
        move |expense_id: String, status: ApprovalStatus| {
            let body = decision(&expense_id, status, &comments.get_untracked());
            let api = api.clone();
            spawn_request(async move {
                match api.create(&body).await {
                    Ok(created) => {
                        pending.update(|s| s.retain(|e| e.id.as_deref() != Some(expense_id.as_str())));
                        approvals.update(|s| s.upsert(created));
                        comments.set(String::new());
                        notify_success(toasts, format!("Expense {}.", status.as_str()));
                    }
                    Err(e) => notify_error(toasts, e.to_string()),
                }
            });
        }
    };
    let on_approve = Callback::new({
        let decide = decide.clone();
        move |id: String| decide(id, ApprovalStatus::Approved)
    });
    let on_reject = Callback::new(move |id: String| decide(id, ApprovalStatus::Rejected));
    let on_delete = Callback::new(move |id: String| approvals.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| approvals.update(ListState::close_dialog));
    let on_confirm_delete = Callback::new(move |()| {
        if let DialogMode::ConfirmDelete(id) = approvals.with_untracked(|s| s.dialog.mode()) {
            delete_row(&api, approvals, toasts, id, "Approval deleted.");
        }
    });

    let mode = dialog_mode(approvals);
    let dialog = move || match mode.get() {
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Delete this approval record?" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        _ => ().into_any(),
    };

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Pending expenses"</h1>
                <input
                    class="resource-page__comment"
                    placeholder="Comment for the next decision"
                    prop:value=move || comments.get()
                    on:input=move |ev| comments.set(event_target_value(&ev))
                />
            </header>
            <CrudTable
                rows=rows(pending)
                loading=loading(pending)
                columns=pending_columns()
                actions=vec![RowAction::new("Approve", on_approve), RowAction::danger("Reject", on_reject)]
                empty_text="Nothing awaiting approval."
            />
            <h2>"Decisions"</h2>
            <CrudTable
                rows=rows(approvals)
                loading=loading(approvals)
                columns=approval_columns()
                actions=vec![RowAction::danger("Delete", on_delete)]
                empty_text="No approvals recorded."
            />
            {dialog}
        </section>
    }
}
