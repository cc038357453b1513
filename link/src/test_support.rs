//! Recording transport for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{CrateLinkError, Result};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.as_bytes().to_vec())));
        self
    }

    pub(crate) fn respond_bytes(self, status: u16, body: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, err: CrateLinkError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Body of the n-th request as UTF-8
    pub(crate) fn body_text(&self, n: usize) -> String {
        let requests = self.requests.lock().unwrap();
        let body = requests[n].body.clone().unwrap_or_default();
        String::from_utf8(body.to_vec()).unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, r#"{"cols":[],"rows":[],"rowcount":0}"#)))
    }
}
