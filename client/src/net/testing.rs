//! Recording transport double shared by client unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::api::ApiClient;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::state::session::Session;

/// Records every request and replays scripted responses in order.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with `status` and a JSON `body`.
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .expect("responses mutex should lock")
            .push_back(Ok(ApiResponse { status, body: body.to_string() }));
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, err: ApiError) {
        self.responses.lock().expect("responses mutex should lock").push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests mutex should lock").clone()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().expect("requests mutex should lock").push(request);
        self.responses
            .lock()
            .expect("responses mutex should lock")
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Session holding `token`, backed by memory.
pub fn signed_in_session(token: &str) -> Session {
    let session = Session::in_memory();
    session.sign_in(token);
    session
}

/// Client over `transport` with a signed-in in-memory session.
pub fn signed_in_client(transport: &Arc<RecordingTransport>) -> ApiClient {
    ApiClient::new(transport.clone(), signed_in_session("tok-123"))
}
