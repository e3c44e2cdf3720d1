use super::*;

#[test]
fn with_query_encodes_values() {
    assert_eq!(
        with_query("/api/v1/rules/grant/g-1/template/max_expense_amount", &[("kwargs", r#"{"limit": 500}"#)]),
        "/api/v1/rules/grant/g-1/template/max_expense_amount?kwargs=%7B%22limit%22%3A%20500%7D"
    );
}

#[test]
fn with_query_joins_pairs_in_order() {
    assert_eq!(with_query("/api/v1/users/", &[("skip", "0"), ("limit", "100")]), "/api/v1/users/?skip=0&limit=100");
}

#[test]
fn with_query_without_pairs_returns_path() {
    assert_eq!(with_query("/api/v1/grants/", &[]), "/api/v1/grants/");
}

#[test]
fn encode_segment_escapes_slashes_and_spaces() {
    assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    assert_eq!(encode_segment("3f2a-11_x.y~z"), "3f2a-11_x.y~z");
}

#[test]
fn response_success_covers_2xx_only() {
    assert!(ApiResponse { status: 200, body: String::new() }.is_success());
    assert!(ApiResponse { status: 204, body: String::new() }.is_success());
    assert!(!ApiResponse { status: 301, body: String::new() }.is_success());
    assert!(!ApiResponse { status: 404, body: String::new() }.is_success());
}

#[test]
fn request_builders_set_fields() {
    let req = ApiRequest::new(Method::Post, "/api/v1/grants/")
        .with_bearer("tok")
        .with_json(serde_json::json!({ "title": "NSF" }));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.bearer.as_deref(), Some("tok"));
    assert_eq!(req.body, Body::Json(serde_json::json!({ "title": "NSF" })));
}

#[test]
fn offline_transport_reports_unavailable() {
    let result = futures::executor::block_on(OfflineTransport.send(ApiRequest::new(Method::Get, "/api/v1/grants/")));
    assert_eq!(result, Err(ApiError::Unavailable));
}
