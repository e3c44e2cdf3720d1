use super::*;
use serde_json::json;

#[test]
fn parse_amount_accepts_separators_and_whitespace() {
    assert_eq!(parse_amount(" 1,250.50 "), Ok(1250.5));
    assert_eq!(parse_amount("0"), Ok(0.0));
}

#[test]
fn parse_amount_rejects_text() {
    assert!(parse_amount("ten").is_err());
    assert!(parse_amount("").is_err());
    assert!(parse_amount("inf").is_err());
}

#[test]
fn date_input_gets_midnight_time() {
    assert_eq!(date_input_to_datetime("2024-03-01"), "2024-03-01T00:00:00");
    assert_eq!(date_input_to_datetime("2024-03-01T09:30:00"), "2024-03-01T09:30:00");
    assert_eq!(date_input_to_datetime(""), "");
}

#[test]
fn display_date_strips_time() {
    assert_eq!(display_date("2024-03-01T00:00:00"), "2024-03-01");
    assert_eq!(display_date("2024-03-01"), "2024-03-01");
}

#[test]
fn format_amount_groups_thousands() {
    assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    assert_eq!(format_amount(999.0), "999.00");
    assert_eq!(format_amount(-2500.0), "-2,500.00");
}

#[test]
fn kwargs_blank_defaults_to_empty_object() {
    assert_eq!(validate_kwargs("  "), Ok(json!({})));
}

#[test]
fn kwargs_must_be_object() {
    assert_eq!(validate_kwargs(r#"{"limit": 500}"#), Ok(json!({ "limit": 500 })));
    assert!(validate_kwargs("[1, 2]").is_err());
    assert!(validate_kwargs("{limit").is_err());
}

#[test]
fn credentials_require_both_fields() {
    assert!(validate_credentials("a@example.com", "pw").is_ok());
    assert!(validate_credentials(" ", "pw").is_err());
    assert!(validate_credentials("a@example.com", "").is_err());
}
