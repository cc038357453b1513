pub mod blob;
pub mod sql;
pub mod table;

#[cfg(test)]
pub(crate) mod fake {
    use async_trait::async_trait;
    use cratedb_link::{CrateLinkClient, HttpRequest, HttpResponse, HttpTransport};
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same response and keeps what it saw.
    pub(crate) struct FixedTransport {
        status: u16,
        body: Vec<u8>,
        pub(crate) requests: Mutex<Vec<HttpRequest>>,
    }

    impl FixedTransport {
        pub(crate) fn new(status: u16, body: impl Into<Vec<u8>>) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.into(),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(&self, request: HttpRequest) -> cratedb_link::Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse::new(self.status, self.body.clone()))
        }
    }

    pub(crate) fn client(transport: Arc<FixedTransport>) -> CrateLinkClient {
        CrateLinkClient::builder()
            .base_url("http://localhost:4200")
            .transport(transport)
            .build()
            .unwrap()
    }
}
