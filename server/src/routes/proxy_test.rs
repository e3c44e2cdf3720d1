use super::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
    if uri.path().ends_with("/missing") {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Grant not found" }))).into_response();
    }
    let header_text = |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "authorization": header_text(header::AUTHORIZATION),
        "content_type": header_text(header::CONTENT_TYPE),
        "cookie": header_text(header::COOKIE),
        "body": body,
    }))
    .into_response()
}

async fn spawn_backend() -> String {
    spawn(Router::new().route("/api/v1/{*rest}", any(echo))).await
}

async fn spawn_proxy(backend_url: &str) -> String {
    let state = ProxyState::new(backend_url, timeouts()).unwrap();
    spawn(router(state)).await
}

fn timeouts() -> ProxyTimeouts {
    ProxyTimeouts { request_secs: 5, connect_secs: 1 }
}

// =============================================================================
// target_url
// =============================================================================

#[test]
fn target_url_keeps_path_and_query() {
    let uri: Uri = "/api/v1/grants/?skip=0&limit=100".parse().unwrap();
    assert_eq!(
        target_url("http://backend:8000", &uri),
        "http://backend:8000/api/v1/grants/?skip=0&limit=100"
    );
}

#[test]
fn target_url_without_query() {
    let uri: Uri = "/api/v1/users/u2".parse().unwrap();
    assert_eq!(target_url("http://backend:8000", &uri), "http://backend:8000/api/v1/users/u2");
}

#[test]
fn new_state_trims_trailing_slash() {
    let state = ProxyState::new("http://backend:8000/", timeouts()).unwrap();
    assert_eq!(&*state.backend_url, "http://backend:8000");
}

#[test]
fn upstream_error_maps_to_bad_gateway() {
    let response = ProxyError::Upstream("connection refused".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Relay
// =============================================================================

#[tokio::test]
async fn relays_method_query_body_and_auth() {
    let backend = spawn_backend().await;
    let proxy = spawn_proxy(&backend).await;

    let response = reqwest::Client::new()
        .post(format!("{proxy}/api/v1/rules/grant/g-1/template/max_amount?kwargs=%7B%7D"))
        .header(header::AUTHORIZATION, "Bearer tok-123")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, "session=abc")
        .body(r#"{"name":"Travel Cap"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = response.json().await.unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["uri"], "/api/v1/rules/grant/g-1/template/max_amount?kwargs=%7B%7D");
    assert_eq!(echoed["authorization"], "Bearer tok-123");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["cookie"], Value::Null);
    assert_eq!(echoed["body"], r#"{"name":"Travel Cap"}"#);
}

#[tokio::test]
async fn relays_delete_without_body() {
    let backend = spawn_backend().await;
    let proxy = spawn_proxy(&backend).await;

    let response = reqwest::Client::new()
        .delete(format!("{proxy}/api/v1/users/u2"))
        .send()
        .await
        .unwrap();

    let echoed: Value = response.json().await.unwrap();
    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["uri"], "/api/v1/users/u2");
    assert_eq!(echoed["body"], "");
}

#[tokio::test]
async fn passes_upstream_error_status_through() {
    let backend = spawn_backend().await;
    let proxy = spawn_proxy(&backend).await;

    let response = reqwest::get(format!("{proxy}/api/v1/grants/missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Grant not found" }));
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway_with_detail() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let proxy = spawn_proxy(&dead).await;

    let response = reqwest::get(format!("{proxy}/api/v1/grants/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("backend unreachable"));
}
