//! Client-side failure taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every view funnels failures into `ApiError` and surfaces them as a toast.
//! Nothing is retried; the operator re-triggers the action manually.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Errors produced by `ApiClient` operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No bearer token is stored; the request was never sent.
    #[error("not signed in")]
    MissingCredential,

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{}", status_message(*status, detail.as_deref()))]
    Status { status: u16, detail: Option<String> },

    /// A success response did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Network calls are only available in the browser.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a status error from a raw response body, pulling out the
    /// backend's `detail` text when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, detail: extract_detail(body) }
    }

    /// True when the operator should be sent back to the sign-in page.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::Status { status: 401, .. })
    }
}

fn status_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("request failed ({status}): {detail}"),
        None => format!("request failed ({status})"),
    }
}

/// Extract the human-readable `detail` from a FastAPI error body.
///
/// `detail` is either a plain string or a list of validation entries with a
/// `msg` field; validation messages are joined with `"; "`.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Array(entries) => {
            let messages = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}
