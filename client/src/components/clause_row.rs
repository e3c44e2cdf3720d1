//! Editable filter and condition rows for the rule editor.
//!
//! Rows are keyed by index and read their values from the editor signal, so
//! typing into one row never rebuilds the others.

use leptos::prelude::*;

use crate::components::toast_host::notify_error;
use crate::net::types::{Operator, RuleCondition, RuleFilter};
use crate::state::rule_editor::{ConditionEdit, EditOutcome, FilterEdit, RuleEditor};
use crate::state::toast::ToastState;

fn operator_options() -> impl IntoView {
    Operator::EDITABLE
        .iter()
        .map(|op| view! { <option value=op.as_str()>{op.as_str()}</option> })
        .collect_view()
}

fn filter_at<T>(editor: RwSignal<RuleEditor>, index: usize, read: impl Fn(&RuleFilter) -> T) -> Option<T> {
    editor.with(|e| e.rule.filters.get(index).map(read))
}

fn condition_at<T>(editor: RwSignal<RuleEditor>, index: usize, read: impl Fn(&RuleCondition) -> T) -> Option<T> {
    editor.with(|e| e.rule.conditions.get(index).map(read))
}

#[component]
pub fn FilterRow(editor: RwSignal<RuleEditor>, index: usize) -> impl IntoView {
    let edit = move |change: FilterEdit| {
        editor.update(|e| {
            e.update_filter(index, change);
        });
    };
    let disabled = move || editor.with(RuleEditor::is_submitting);

    view! {
        <div class="clause-row">
            <input
                class="clause-row__field"
                placeholder="field"
                prop:value=move || filter_at(editor, index, |f| f.field.clone()).unwrap_or_default()
                on:input=move |ev| edit(FilterEdit::Field(event_target_value(&ev)))
                disabled=disabled
            />
            <select
                class="clause-row__operator"
                prop:value=move || filter_at(editor, index, |f| f.operator.as_str()).unwrap_or("=")
                on:change=move |ev| {
                    if let Ok(op) = event_target_value(&ev).parse::<Operator>() {
                        edit(FilterEdit::Operator(op));
                    }
                }
                disabled=disabled
            >
                {operator_options()}
            </select>
            <input
                class="clause-row__value"
                placeholder="value"
                prop:value=move || filter_at(editor, index, |f| f.value.clone()).unwrap_or_default()
                on:input=move |ev| edit(FilterEdit::Value(event_target_value(&ev)))
                disabled=disabled
            />
            <button
                class="btn btn--small btn--danger"
                on:click=move |_| {
                    editor.update(|e| {
                        e.remove_filter(index);
                    });
                }
                disabled=disabled
            >
                "Remove"
            </button>
        </div>
    }
}

#[component]
pub fn ConditionRow(editor: RwSignal<RuleEditor>, index: usize) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let edit = move |change: ConditionEdit| {
        let outcome = editor.try_update(|e| e.update_condition(index, change));
        if let Some(EditOutcome::Invalid(message)) = outcome {
            notify_error(toasts, message);
        }
    };
    let disabled = move || editor.with(RuleEditor::is_submitting);

    view! {
        <div class="clause-row">
            <input
                class="clause-row__field"
                placeholder="field"
                prop:value=move || condition_at(editor, index, |c| c.field.clone()).unwrap_or_default()
                on:input=move |ev| edit(ConditionEdit::Field(event_target_value(&ev)))
                disabled=disabled
            />
            <select
                class="clause-row__operator"
                prop:value=move || condition_at(editor, index, |c| c.operator.as_str()).unwrap_or("=")
                on:change=move |ev| {
                    if let Ok(op) = event_target_value(&ev).parse::<Operator>() {
                        edit(ConditionEdit::Operator(op));
                    }
                }
                disabled=disabled
            >
                {operator_options()}
            </select>
            <input
                class="clause-row__value"
                placeholder="value"
                prop:value=move || condition_at(editor, index, |c| c.value.clone()).unwrap_or_default()
                on:input=move |ev| edit(ConditionEdit::Value(event_target_value(&ev)))
                disabled=disabled
            />
            <input
                class="clause-row__order"
                type="number"
                step="1"
                prop:value=move || condition_at(editor, index, |c| c.order.to_string()).unwrap_or_default()
                on:change=move |ev| edit(ConditionEdit::Order(event_target_value(&ev)))
                disabled=disabled
            />
            <button
                class="btn btn--small btn--danger"
                on:click=move |_| {
                    editor.update(|e| {
                        e.remove_condition(index);
                    });
                }
                disabled=disabled
            >
                "Remove"
            </button>
        </div>
    }
}
