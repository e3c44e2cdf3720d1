//! Same-origin relay for the grants REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host. Every `/api/v1/...` request is
//! replayed against `BACKEND_URL` with its method, query string, body, and
//! auth headers, and the upstream status and body are handed back verbatim.
//!
//! ERROR HANDLING
//! ==============
//! Upstream error statuses pass through untouched. Transport failures become
//! `502 Bad Gateway` with a `{"detail": ...}` body, the same shape the
//! backend uses for its own errors.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use crate::config::ProxyTimeouts;

/// Request headers copied onto the upstream request.
const FORWARDED_HEADERS: [HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

/// Errors produced while relaying a request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The shared HTTP client could not be constructed.
    #[error("proxy client build failed: {0}")]
    ClientBuild(String),

    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Upstream(String),

    /// The backend answered but its body could not be read.
    #[error("backend response unreadable: {0}")]
    UpstreamBody(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) | Self::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Shared proxy state: one pooled client and the backend origin.
#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    backend_url: Arc<str>,
}

impl ProxyState {
    /// # Errors
    ///
    /// Returns `ProxyError::ClientBuild` if the TLS backend fails to initialize.
    pub fn new(backend_url: &str, timeouts: ProxyTimeouts) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;
        Ok(Self { http, backend_url: Arc::from(backend_url.trim_end_matches('/')) })
    }
}

/// `ANY /api/v1/{*path}` relayed to the backend.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/v1/{*path}", any(forward))
        .with_state(state)
}

/// Backend URL for an incoming request, keeping path and query string.
pub fn target_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{backend_url}{path_and_query}")
}

async fn forward(
    State(proxy): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = target_url(&proxy.backend_url, &uri);

    let mut request = proxy.http.request(method.clone(), &url);
    for name in &FORWARDED_HEADERS {
        if let Some(value) = headers.get(name) {
            request = request.header(name.clone(), value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::warn!(%method, %url, error = %e, "backend request failed");
        ProxyError::Upstream(e.to_string())
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::UpstreamBody(e.to_string()))?;
    tracing::debug!(%method, %url, status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}
