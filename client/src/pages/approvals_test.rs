use super::*;

#[test]
fn decision_trims_and_drops_blank_comments() {
    let approval = decision("e-1", ApprovalStatus::Rejected, "   ");
    assert_eq!(approval.expense_id.as_deref(), Some("e-1"));
    assert_eq!(approval.status, ApprovalStatus::Rejected);
    assert_eq!(approval.comments, None);
}

#[test]
fn decision_serializes_without_identity() {
    let approval = decision("e-1", ApprovalStatus::Approved, " receipts ok ");
    assert_eq!(
        serde_json::to_value(approval).unwrap(),
        serde_json::json!({ "expense_id": "e-1", "status": "approved", "comments": "receipts ok" })
    );
}
