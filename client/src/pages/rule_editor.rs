//! Rule editor page for `/rules/new` and `/rules/:id`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a `RuleEditor` signal. Existing rules are located in the selected
//! grant's rule list. A successful create returns to the rule list; a
//! successful update stays on the page with the server copy. When an
//! existing rule cannot be loaded the form is withheld, so a blank draft is
//! never posted in its place.

#[cfg(test)]
#[path = "rule_editor_test.rs"]
mod rule_editor_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::clause_row::{ConditionRow, FilterRow};
use crate::components::toast_host::{notify_error, notify_success};
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Aggregator, Page, Rule, RuleType};
use crate::state::rule_editor::{HeaderEdit, RuleEditor, SubmitOutcome, send};
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::auth::{install_pending_navigation, install_signed_out_redirect};
use crate::util::task::spawn_request;

/// Pick rule `rule_id` out of a grant's rule listing.
///
/// # Errors
///
/// Returns the text to show in place of the form.
pub fn locate_rule(listing: Result<Page<Rule>, ApiError>, rule_id: &str) -> Result<Rule, String> {
    let page = listing.map_err(|e| format!("Could not load rule: {e}"))?;
    page.data
        .into_iter()
        .find(|rule| rule.id.as_deref() == Some(rule_id))
        .ok_or_else(|| format!("Rule {rule_id} was not found on this grant."))
}

#[component]
pub fn RuleEditorPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let goto = install_pending_navigation(navigate.clone());
    let params = use_params_map();
    let grant_id = session.selected_grant().map(|g| g.id).unwrap_or_default();
    let editor = RwSignal::new(RuleEditor::new(&grant_id));
    let loading = RwSignal::new(false);
    let load_error = RwSignal::new(None::<String>);

    install_signed_out_redirect(session.clone(), navigate, {
        let api = api.clone();
        move || {
            let Some(rule_id) = params.with_untracked(|p| p.get("id")) else {
                return;
            };
            let Some(grant) = session.selected_grant() else {
                notify_error(toasts, "Select a grant before editing its rules.");
                load_error.set(Some("No grant selected.".to_owned()));
                goto.set(Some("/grants".to_owned()));
                return;
            };
            loading.set(true);
            spawn_request(async move {
                match locate_rule(api.grant_rules(&grant.id).await, &rule_id) {
                    Ok(rule) => editor.set(RuleEditor::load(rule)),
                    Err(message) => {
                        notify_error(toasts, message.clone());
                        load_error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = editor.try_update(RuleEditor::begin_submit).flatten() else {
            return;
        };
        let api = api.clone();
        spawn_request(async move {
            let result = send(&api, &request).await;
            match editor.try_update(|e| e.finish_submit(result)) {
                Some(SubmitOutcome::Created(rule)) => {
                    notify_success(toasts, format!("Rule \"{}\" created.", rule.name));
                    goto.set(Some("/rules".to_owned()));
                }
                Some(SubmitOutcome::Updated) => notify_success(toasts, "Rule saved."),
                Some(SubmitOutcome::Failed(message)) => notify_error(toasts, message),
                Some(SubmitOutcome::Ignored) | None => {}
            }
        });
    };

    let header = move |edit: HeaderEdit| editor.update(|e| e.edit_header(edit));
    let submitting = move || editor.with(RuleEditor::is_submitting);
    let rule_text = move |read: fn(&Rule) -> String| editor.with(|e| read(&e.rule));

    view! {
        <section class="resource-page rule-editor">
            <header class="resource-page__header">
                <h1>
                    {move || {
                        let existing = editor.with(RuleEditor::is_update) || params.with(|p| p.get("id").is_some());
                        if existing { "Edit rule" } else { "New rule" }
                    }}
                </h1>
                <a class="btn" href="/rules">"Back to rules"</a>
            </header>
            <Show
                when=move || !loading.get() && load_error.with(Option::is_none)
                fallback=move || {
                    view! {
                        <p class="rule-editor__status">
                            {move || load_error.get().unwrap_or_else(|| "Loading rule...".to_owned())}
                        </p>
                    }
                }
            >
                <form class="rule-editor__form" on:submit=on_submit.clone()>
                    <fieldset class="rule-editor__section" disabled=submitting>
                        <legend>"Rule"</legend>
                        <label class="dialog__label">
                            "Name"
                            <input
                                class="dialog__input"
                                prop:value=move || rule_text(|r| r.name.clone())
                                on:input=move |ev| header(HeaderEdit::Name(event_target_value(&ev)))
                            />
                        </label>
                        <label class="dialog__label">
                            "Description"
                            <textarea
                                class="dialog__textarea"
                                prop:value=move || rule_text(|r| r.description.clone().unwrap_or_default())
                                on:input=move |ev| header(HeaderEdit::Description(event_target_value(&ev)))
                            ></textarea>
                        </label>
                        <label class="dialog__label">
                            "Type"
                            <select
                                class="dialog__select"
                                prop:value=move || rule_text(|r| r.rule_type.as_str().to_owned())
                                on:change=move |ev| {
                                    if let Ok(rule_type) = event_target_value(&ev).parse::<RuleType>() {
                                        header(HeaderEdit::RuleType(rule_type));
                                    }
                                }
                            >
                                {RuleType::ALL
                                    .iter()
                                    .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="dialog__label">
                            "Aggregator"
                            <select
                                class="dialog__select"
                                prop:value=move || rule_text(|r| r.aggregator.map(|a| a.as_str().to_owned()).unwrap_or_default())
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    header(HeaderEdit::Aggregator(raw.parse::<Aggregator>().ok()));
                                }
                            >
                                <option value="">"None"</option>
                                {Aggregator::EDITABLE
                                    .iter()
                                    .map(|a| view! { <option value=a.as_str()>{a.as_str()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="dialog__label">
                            "Error message"
                            <input
                                class="dialog__input"
                                prop:value=move || rule_text(|r| r.error_message.clone())
                                on:input=move |ev| header(HeaderEdit::ErrorMessage(event_target_value(&ev)))
                            />
                        </label>
                        <label class="dialog__check">
                            <input
                                type="checkbox"
                                prop:checked=move || editor.with(|e| e.rule.is_active)
                                on:change=move |ev| header(HeaderEdit::Active(event_target_checked(&ev)))
                            />
                            "Active"
                        </label>
                    </fieldset>

                    <fieldset class="rule-editor__section" disabled=submitting>
                        <legend>"Filters"</legend>
                        <For
                            each=move || 0..editor.with(|e| e.rule.filters.len())
                            key=|index| *index
                            children=move |index| view! { <FilterRow editor=editor index=index /> }
                        />
                        <button
                            type="button"
                            class="btn btn--small"
                            on:click=move |_| editor.update(RuleEditor::add_filter)
                        >
                            "Add filter"
                        </button>
                    </fieldset>

                    <fieldset class="rule-editor__section" disabled=submitting>
                        <legend>"Conditions"</legend>
                        <For
                            each=move || 0..editor.with(|e| e.rule.conditions.len())
                            key=|index| *index
                            children=move |index| view! { <ConditionRow editor=editor index=index /> }
                        />
                        <button
                            type="button"
                            class="btn btn--small"
                            on:click=move |_| editor.update(RuleEditor::add_condition)
                        >
                            "Add condition"
                        </button>
                    </fieldset>

                    <div class="dialog__actions">
                        {move || {
                            editor
                                .with(|e| e.last_error.clone())
                                .map(|message| view! { <span class="rule-editor__error">{message}</span> })
                        }}
                        <button class="btn btn--primary" type="submit" disabled=submitting>
                            {move || if submitting() { "Saving..." } else { "Save rule" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
