use super::*;

#[test]
fn from_status_extracts_string_detail() {
    let err = ApiError::from_status(400, r#"{"detail":"Grant not found"}"#);
    assert_eq!(err, ApiError::Status { status: 400, detail: Some("Grant not found".to_owned()) });
    assert_eq!(err.to_string(), "request failed (400): Grant not found");
}

#[test]
fn from_status_joins_validation_messages() {
    let body = r#"{"detail":[{"loc":["body","amount"],"msg":"field required"},{"msg":"value is not a valid float"}]}"#;
    let err = ApiError::from_status(422, body);
    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            detail: Some("field required; value is not a valid float".to_owned())
        }
    );
}

#[test]
fn from_status_without_detail_keeps_status_only() {
    let err = ApiError::from_status(500, "Internal Server Error");
    assert_eq!(err, ApiError::Status { status: 500, detail: None });
    assert_eq!(err.to_string(), "request failed (500)");
}

#[test]
fn requires_sign_in_for_missing_token_and_401() {
    assert!(ApiError::MissingCredential.requires_sign_in());
    assert!(ApiError::Status { status: 401, detail: None }.requires_sign_in());
    assert!(!ApiError::Status { status: 403, detail: None }.requires_sign_in());
    assert!(!ApiError::Transport("offline".to_owned()).requires_sign_in());
}
