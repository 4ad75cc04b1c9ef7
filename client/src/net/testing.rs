//! Scripted transport for exercising `ApiClient` without a browser.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::error::ApiError;
use super::http::{CancelToken, HttpRequest, HttpResponse, Transport};

#[derive(Clone, Debug, Default)]
pub struct FakeTransport {
    sent: Arc<Mutex<Vec<HttpRequest>>>,
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
    /// Flipped after the request is recorded, simulating teardown mid-flight.
    cancel_on_send: Arc<Mutex<Option<CancelToken>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Result<HttpResponse, ApiError>) -> &Self {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(reply);
        self
    }

    pub fn reply_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.reply(Ok(json_response(status, &body.to_string())))
    }

    pub fn cancel_on_send(&self, token: &CancelToken) {
        *self.cancel_on_send.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        if let Some(token) = self.cancel_on_send.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            token.cancel();
        }
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("application/json; charset=utf-8".to_owned()), body: body.to_owned() }
}

pub fn html_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("text/html".to_owned()), body: body.to_owned() }
}
