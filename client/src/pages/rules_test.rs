use super::*;
use crate::net::types::{Operator, RuleFilter};

#[test]
fn toggled_flips_only_active_flag() {
    let rule = Rule {
        id: Some("r-1".to_owned()),
        name: "Cap".to_owned(),
        is_active: true,
        filters: vec![RuleFilter { field: "amount".to_owned(), operator: Operator::Gt, ..RuleFilter::default() }],
        ..Rule::default()
    };

    let next = toggled(&rule);

    assert!(!next.is_active);
    assert_eq!(Rule { is_active: true, ..next }, rule);
}

#[test]
fn template_label_humanizes_name() {
    assert_eq!(template_label("max_expense_amount"), "Max expense amount");
    assert_eq!(template_label(""), "");
}
