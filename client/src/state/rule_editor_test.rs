use super::*;
use crate::net::testing::{RecordingTransport, signed_in_client};
use crate::net::transport::{Body, Method};
use futures::executor::block_on;
use serde_json::json;

// =============================================================
// Helpers
// =============================================================

fn fetched_rule() -> Rule {
    serde_json::from_value(json!({
        "id": "r-9",
        "grant_id": "g-1",
        "name": "Equipment Cap",
        "description": "Limits equipment spend",
        "rule_type": "budget",
        "aggregator": "MAX",
        "error_message": "Too much equipment",
        "is_active": true,
        "filters": [
            { "id": "f-1", "field": "category", "operator": "=", "value": "equipment",
              "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z" }
        ],
        "conditions": [
            { "id": "c-1", "field": "amount", "operator": "<=", "value": "5000", "order": 0,
              "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z" }
        ],
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

fn editor_with_filters(values: &[&str]) -> RuleEditor {
    let mut editor = RuleEditor::new("g-1");
    for (index, value) in values.iter().enumerate() {
        editor.add_filter();
        editor.update_filter(index, FilterEdit::Value((*value).to_owned()));
    }
    editor
}

fn filter_values(editor: &RuleEditor) -> Vec<&str> {
    editor.rule.filters.iter().map(|f| f.value.as_str()).collect()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_editor_is_idle_blank_and_active() {
    let editor = RuleEditor::new("g-1");
    assert_eq!(editor.phase, EditorPhase::Idle);
    assert_eq!(editor.rule.grant_id, "g-1");
    assert!(editor.rule.is_active);
    assert!(editor.rule.filters.is_empty());
    assert!(editor.rule.conditions.is_empty());
    assert!(!editor.is_update());
}

#[test]
fn first_edit_moves_idle_to_editing() {
    let mut editor = RuleEditor::new("g-1");
    editor.edit_header(HeaderEdit::Name("Cap".to_owned()));
    assert_eq!(editor.phase, EditorPhase::Editing);
    assert_eq!(editor.rule.name, "Cap");
}

#[test]
fn empty_description_clears_field() {
    let mut editor = RuleEditor::load(fetched_rule());
    editor.edit_header(HeaderEdit::Description(String::new()));
    assert_eq!(editor.rule.description, None);
}

// =============================================================
// Add / remove
// =============================================================

#[test]
fn added_clauses_are_blank_with_equals_operator() {
    let mut editor = RuleEditor::new("g-1");
    editor.add_filter();
    editor.add_condition();

    let filter = &editor.rule.filters[0];
    assert_eq!(filter.operator, Operator::Eq);
    assert_eq!(filter.id, None);
    assert_eq!(filter.created_at, None);
    let condition = &editor.rule.conditions[0];
    assert_eq!(condition.operator, Operator::Eq);
    assert_eq!(condition.order, 0);
    assert_eq!(condition.id, None);
}

#[test]
fn length_tracks_adds_minus_removes() {
    let mut editor = editor_with_filters(&["a", "b", "c", "d"]);
    assert_eq!(editor.remove_filter(1), EditOutcome::Applied);
    assert_eq!(editor.remove_filter(10), EditOutcome::OutOfRange);
    assert_eq!(editor.rule.filters.len(), 3);
    assert_eq!(filter_values(&editor), vec!["a", "c", "d"]);
}

#[test]
fn removing_condition_keeps_order_values() {
    let mut editor = RuleEditor::new("g-1");
    for order in ["0", "1", "2"] {
        editor.add_condition();
        let last = editor.rule.conditions.len() - 1;
        editor.update_condition(last, ConditionEdit::Order(order.to_owned()));
    }

    editor.remove_condition(1);

    let orders = editor.rule.conditions.iter().map(|c| c.order).collect::<Vec<_>>();
    assert_eq!(orders, vec![0, 2]);
}

// =============================================================
// Indexed updates
// =============================================================

#[test]
fn update_touches_only_target_index() {
    let mut editor = editor_with_filters(&["a", "b", "c"]);
    let before = editor.rule.filters.clone();

    assert_eq!(editor.update_filter(1, FilterEdit::Operator(Operator::Gt)), EditOutcome::Applied);

    assert_eq!(editor.rule.filters[0], before[0]);
    assert_eq!(editor.rule.filters[2], before[2]);
    assert_eq!(editor.rule.filters[1].operator, Operator::Gt);
    assert_eq!(editor.rule.filters[1].value, "b");
}

#[test]
fn update_out_of_range_is_noop() {
    let mut editor = editor_with_filters(&["a"]);
    let before = editor.clone();

    assert_eq!(editor.update_filter(3, FilterEdit::Value("x".to_owned())), EditOutcome::OutOfRange);
    assert_eq!(editor.update_condition(0, ConditionEdit::Value("x".to_owned())), EditOutcome::OutOfRange);

    assert_eq!(editor, before);
}

#[test]
fn non_integer_order_is_rejected() {
    let mut editor = RuleEditor::new("g-1");
    editor.add_condition();

    let outcome = editor.update_condition(0, ConditionEdit::Order("1.5".to_owned()));

    assert!(matches!(outcome, EditOutcome::Invalid(_)));
    assert_eq!(editor.rule.conditions[0].order, 0);
    assert_eq!(editor.update_condition(0, ConditionEdit::Order(" 3 ".to_owned())), EditOutcome::Applied);
    assert_eq!(editor.rule.conditions[0].order, 3);
}

// =============================================================
// Submit
// =============================================================

#[test]
fn travel_cap_submits_one_post_with_nested_values() {
    let transport = RecordingTransport::new();
    transport.respond(200, json!({
        "id": "r-1", "grant_id": "g-1", "name": "Travel Cap", "rule_type": "expense",
        "aggregator": "SUM", "error_message": "Travel budget exceeded", "is_active": true,
        "filters": [], "conditions": []
    }));
    let api = signed_in_client(&transport);
    let mut editor = RuleEditor::new("g-1");
    editor.edit_header(HeaderEdit::Name("Travel Cap".to_owned()));
    editor.edit_header(HeaderEdit::Aggregator(Some(Aggregator::Sum)));
    editor.edit_header(HeaderEdit::ErrorMessage("Travel budget exceeded".to_owned()));
    editor.add_filter();
    editor.update_filter(0, FilterEdit::Field("amount".to_owned()));
    editor.update_filter(0, FilterEdit::Operator(Operator::Gt));
    editor.update_filter(0, FilterEdit::Value("1000".to_owned()));
    editor.add_condition();
    editor.update_condition(0, ConditionEdit::Field("category".to_owned()));
    editor.update_condition(0, ConditionEdit::Value("travel".to_owned()));
    editor.update_condition(0, ConditionEdit::Order("0".to_owned()));

    let request = editor.begin_submit().unwrap();
    let result = block_on(send(&api, &request));
    let outcome = editor.finish_submit(result);

    assert!(matches!(outcome, SubmitOutcome::Created(ref rule) if rule.id.as_deref() == Some("r-1")));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "/api/v1/rules/");
    assert_eq!(
        requests[0].body,
        Body::Json(json!({
            "grant_id": "g-1",
            "name": "Travel Cap",
            "description": null,
            "rule_type": "expense",
            "aggregator": "SUM",
            "error_message": "Travel budget exceeded",
            "is_active": true,
            "filters": [{ "field": "amount", "operator": ">", "value": "1000" }],
            "conditions": [{ "field": "category", "operator": "=", "value": "travel", "order": 0 }]
        }))
    );
    assert_eq!(editor.phase, EditorPhase::Idle);
    assert!(editor.rule.filters.is_empty());
}

#[test]
fn empty_rule_submits_verbatim() {
    let mut editor = RuleEditor::new("g-1");
    let request = editor.begin_submit().unwrap();

    assert_eq!(request.mode, SubmitMode::Create);
    assert!(request.rule.filters.is_empty());
    assert!(request.rule.conditions.is_empty());
    assert_eq!(request.rule.name, "");
}

#[test]
fn loaded_rule_round_trips_without_edits() {
    let transport = RecordingTransport::new();
    let fetched = fetched_rule();
    transport.respond(200, serde_json::to_value(&fetched).unwrap());
    let api = signed_in_client(&transport);
    let mut editor = RuleEditor::load(fetched.clone());

    let request = editor.begin_submit().unwrap();
    let result = block_on(send(&api, &request));

    assert_eq!(request.mode, SubmitMode::Update("r-9".to_owned()));
    assert_eq!(editor.finish_submit(result), SubmitOutcome::Updated);
    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].url, "/api/v1/rules/r-9");
    assert_eq!(requests[0].body, Body::Json(serde_json::to_value(&fetched).unwrap()));
}

#[test]
fn update_success_replaces_local_rule() {
    let mut editor = RuleEditor::load(fetched_rule());
    editor.edit_header(HeaderEdit::Name("Renamed".to_owned()));
    editor.begin_submit().unwrap();
    let mut server_copy = editor.rule.clone();
    server_copy.updated_at = Some("2024-02-01T00:00:00Z".to_owned());

    assert_eq!(editor.finish_submit(Ok(server_copy.clone())), SubmitOutcome::Updated);

    assert_eq!(editor.rule, server_copy);
    assert_eq!(editor.phase, EditorPhase::Idle);
}

#[test]
fn second_submit_is_refused_while_in_flight() {
    let mut editor = RuleEditor::new("g-1");
    assert!(editor.begin_submit().is_some());
    assert!(editor.is_submitting());
    assert!(editor.begin_submit().is_none());
}

#[test]
fn failed_submit_keeps_edits_for_retry() {
    let mut editor = editor_with_filters(&["a", "b"]);
    let draft = editor.rule.clone();
    editor.begin_submit().unwrap();

    let outcome = editor.finish_submit(Err(ApiError::Status { status: 422, detail: Some("bad field".to_owned()) }));

    assert_eq!(outcome, SubmitOutcome::Failed("request failed (422): bad field".to_owned()));
    assert_eq!(editor.rule, draft);
    assert_eq!(editor.phase, EditorPhase::Editing);
    assert_eq!(editor.last_error.as_deref(), Some("request failed (422): bad field"));
    assert!(editor.begin_submit().is_some());
    assert_eq!(editor.last_error, None);
}

#[test]
fn finish_without_submit_is_ignored() {
    let mut editor = RuleEditor::new("g-1");
    assert_eq!(editor.finish_submit(Ok(Rule::default())), SubmitOutcome::Ignored);
    assert_eq!(editor.phase, EditorPhase::Idle);
}

#[test]
fn missing_token_fails_submit_without_request() {
    let transport = RecordingTransport::new();
    let api = crate::net::api::ApiClient::new(transport.clone(), crate::state::session::Session::in_memory());
    let mut editor = RuleEditor::new("g-1");

    let request = editor.begin_submit().unwrap();
    let outcome = editor.finish_submit(block_on(send(&api, &request)));

    assert_eq!(outcome, SubmitOutcome::Failed("not signed in".to_owned()));
    assert!(transport.requests().is_empty());
}
