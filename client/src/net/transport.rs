//! HTTP transport seam between the typed API client and the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` builds `ApiRequest` values and hands them to a `Transport`.
//! In the browser (`hydrate`) that is `gloo-net`; during SSR every call
//! resolves to `ApiError::Unavailable`. Tests substitute a recording double.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::error::ApiError;

/// Characters left untouched when encoding query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// HTTP verbs used by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs (token issuance only).
    Form(Vec<(String, String)>),
}

/// A fully-resolved request ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path including the encoded query string.
    pub url: String,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), bearer: None, body: Body::Empty }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    #[must_use]
    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Body::Form(pairs);
        self
    }
}

/// Raw response: status plus undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Implementations never retry.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Append `query` pairs to `path`, percent-encoding each value.
pub fn with_query(path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return path.to_owned();
    }
    let encoded = query
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{encoded}")
}

/// Percent-encode a single path segment (ids, template names).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, QUERY_VALUE).to_string()
}

/// Transport used when no browser is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Unavailable)
    }
}

/// `fetch`-backed transport for the browser build.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::Request;

        let transport_err = |e: gloo_net::Error| ApiError::Transport(e.to_string());

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("accept", "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let outgoing = match request.body {
            Body::Empty => builder.build().map_err(transport_err)?,
            Body::Json(value) => builder.json(&value).map_err(transport_err)?,
            Body::Form(pairs) => {
                let params = web_sys::UrlSearchParams::new()
                    .map_err(|_| ApiError::Transport("form encoding unavailable".to_owned()))?;
                for (key, value) in &pairs {
                    params.append(key, value);
                }
                builder.body(params).map_err(transport_err)?
            }
        };

        let resp = outgoing.send().await.map_err(transport_err)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_err)?;
        Ok(ApiResponse { status, body })
    }
}

/// Transport for the current build target.
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserTransport)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(OfflineTransport)
    }
}
