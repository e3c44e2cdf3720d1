use super::*;
use crate::state::rule_editor::SubmitMode;

fn listing(ids: &[&str]) -> Result<Page<Rule>, ApiError> {
    let data = ids
        .iter()
        .map(|id| Rule { id: Some((*id).to_owned()), grant_id: "g-1".to_owned(), ..Rule::default() })
        .collect::<Vec<_>>();
    Ok(Page { count: i64::try_from(data.len()).unwrap(), data })
}

#[test]
fn locate_rule_picks_matching_id() {
    let rule = locate_rule(listing(&["r-1", "r-2"]), "r-2").unwrap();
    assert_eq!(rule.id.as_deref(), Some("r-2"));
}

#[test]
fn unknown_rule_id_withholds_form() {
    let err = locate_rule(listing(&["r-1"]), "r-9").unwrap_err();
    assert_eq!(err, "Rule r-9 was not found on this grant.");
}

#[test]
fn failed_listing_withholds_form() {
    let err = locate_rule(Err(ApiError::Transport("offline".to_owned())), "r-1").unwrap_err();
    assert_eq!(err, "Could not load rule: request failed: offline");
}

#[test]
fn located_rule_submits_as_update() {
    let rule = locate_rule(listing(&["r-1"]), "r-1").unwrap();
    let mut editor = RuleEditor::load(rule);
    let request = editor.begin_submit().unwrap();
    assert_eq!(request.mode, SubmitMode::Update("r-1".to_owned()));
}
