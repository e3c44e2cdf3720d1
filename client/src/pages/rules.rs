//! Rules of the selected grant: list, toggle, delete, and instantiate
//! server-side templates.

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::list_actions::{delete_row, dialog_mode, load_with, loading, rows};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::crud_table::{Column, CrudTable, RowAction};
use crate::components::field::{SelectField, TextAreaField};
use crate::components::modal::Modal;
use crate::components::toast_host::{notify_error, notify_success};
use crate::net::api::ApiClient;
use crate::net::types::{Page, Rule};
use crate::state::resource_list::{DialogMode, ListState};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::{install_pending_navigation, install_signed_out_redirect};
use crate::util::form::validate_kwargs;
use crate::util::task::spawn_request;

fn columns() -> Vec<Column<Rule>> {
    vec![
        Column::new("Name", |r: &Rule| r.name.clone()),
        Column::new("Type", |r: &Rule| r.rule_type.as_str().to_owned()),
        Column::new("Aggregator", |r: &Rule| r.aggregator.map(|a| a.as_str().to_owned()).unwrap_or_default()),
        Column::new("Filters", |r: &Rule| r.filters.len().to_string()),
        Column::new("Conditions", |r: &Rule| r.conditions.len().to_string()),
        Column::new("Active", |r: &Rule| if r.is_active { "Yes" } else { "No" }.to_owned()),
    ]
}

/// Copy of `rule` with `is_active` flipped, ready to PUT back whole.
pub fn toggled(rule: &Rule) -> Rule {
    Rule { is_active: !rule.is_active, ..rule.clone() }
}

/// Human label for a template name such as `max_expense_amount`.
pub fn template_label(name: &str) -> String {
    let mut label = name.replace('_', " ");
    if let Some(first) = label.get(..1) {
        let upper = first.to_uppercase();
        label.replace_range(..1, &upper);
    }
    label
}

#[component]
pub fn RulesPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let goto = install_pending_navigation(navigate.clone());
    let state = RwSignal::new(ListState::<Rule>::default());
    let templates = RwSignal::new(Vec::<String>::new());
    let template_open = RwSignal::new(false);
    let template_name = RwSignal::new(String::new());
    let template_kwargs = RwSignal::new("{}".to_owned());

    let reload = Callback::new({
        let api = api.clone();
        let session = session.clone();
        move |()| {
            let Some(grant) = session.selected_grant() else {
                state.update(|s| s.finish_load(Ok(Page { data: Vec::new(), count: 0 })));
                return;
            };
            let api = api.clone();
            load_with(state, async move { api.grant_rules(&grant.id).await });
        }
    });
    install_signed_out_redirect(session.clone(), navigate, move || reload.run(()));

    let on_edit = Callback::new(move |id: String| goto.set(Some(format!("/rules/{id}"))));
    let on_toggle = Callback::new({
        let api = api.clone();
        move |id: String| {
            let Some(rule) = state.with_untracked(|s| s.find(&id).cloned()) else {
                return;
            };
            let next = toggled(&rule);
            let api = api.clone();
            spawn_request(async move {
                match api.update_rule(&id, &next).await {
                    Ok(saved) => {
                        let text = if saved.is_active { "Rule activated." } else { "Rule deactivated." };
                        state.update(|s| s.upsert(saved));
                        notify_success(toasts, text);
                    }
                    Err(e) => notify_error(toasts, e.to_string()),
                }
            });
        }
    });
    let on_delete = Callback::new(move |id: String| state.update(|s| s.open_delete(&id)));
    let on_close = Callback::new(move |()| state.update(ListState::close_dialog));
    let on_confirm_delete = Callback::new({
        let api = api.clone();
        move |()| {
            if let DialogMode::ConfirmDelete(id) = state.with_untracked(|s| s.dialog.mode()) {
                delete_row(&api, state, toasts, id, "Rule deleted.");
            }
        }
    });

    let on_open_templates = {
        let api = api.clone();
        move |_| {
            template_open.set(true);
            template_kwargs.set("{}".to_owned());
            let api = api.clone();
            spawn_request(async move {
                match api.rule_templates().await {
                    Ok(names) => {
                        template_name.set(names.first().cloned().unwrap_or_default());
                        templates.set(names);
                    }
                    Err(e) => notify_error(toasts, format!("Could not load templates: {e}")),
                }
            });
        }
    };
    let on_close_templates = Callback::new(move |()| template_open.set(false));
    let on_apply_template = Callback::new({
        let api = api.clone();
        let session = session.clone();
        move |()| {
            let Some(grant) = session.selected_grant() else {
                notify_error(toasts, "Select a grant first.");
                return;
            };
            let name = template_name.get_untracked();
            if name.is_empty() {
                notify_error(toasts, "Choose a template.");
                return;
            }
            let kwargs = match validate_kwargs(&template_kwargs.get_untracked()) {
                Ok(kwargs) => kwargs,
                Err(message) => {
                    notify_error(toasts, message);
                    return;
                }
            };
            let api = api.clone();
            spawn_request(async move {
                match api.create_rule_from_template(&grant.id, &name, &kwargs).await {
                    Ok(rule) => {
                        state.update(|s| s.upsert(rule));
                        template_open.set(false);
                        notify_success(toasts, "Rule created from template.");
                    }
                    Err(e) => notify_error(toasts, e.to_string()),
                }
            });
        }
    });

    let template_options = Signal::derive(move || {
        templates.get().into_iter().map(|name| (name.clone(), template_label(&name))).collect::<Vec<_>>()
    });

    let mode = dialog_mode(state);
    let delete_dialog = move || match mode.get() {
        DialogMode::ConfirmDelete(_) => view! {
            <ConfirmDialog message="Delete this rule?" on_cancel=on_close on_confirm=on_confirm_delete />
        }
        .into_any(),
        _ => ().into_any(),
    };

    let grant_title = move || session.selected_grant().map(|g| g.title).unwrap_or_default();

    view! {
        <section class="resource-page">
            <header class="resource-page__header">
                <h1>"Rules"</h1>
                <span class="resource-page__scope">{grant_title}</span>
                <a class="btn btn--primary" href="/rules/new">"New rule"</a>
                <button class="btn" on:click=on_open_templates>"From template"</button>
            </header>
            <CrudTable
                rows=rows(state)
                loading=loading(state)
                columns=columns()
                actions=vec![
                    RowAction::new("Edit", on_edit),
                    RowAction::new("Toggle", on_toggle),
                    RowAction::danger("Delete", on_delete),
                ]
                empty_text="No rules for this grant."
            />
            {delete_dialog}
            <Show when=move || template_open.get()>
                <Modal title="Create rule from template" on_close=on_close_templates>
                    <SelectField
                        label="Template"
                        options=template_options
                        value=template_name
                        on_change=Callback::new(move |v| template_name.set(v))
                    />
                    <TextAreaField
                        label="Parameters (JSON object)"
                        value=template_kwargs
                        on_input=Callback::new(move |v| template_kwargs.set(v))
                    />
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_close_templates.run(())>"Cancel"</button>
                        <button class="btn btn--primary" on:click=move |_| on_apply_template.run(())>"Create"</button>
                    </div>
                </Modal>
            </Show>
        </section>
    }
}
