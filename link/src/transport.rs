//! HTTP transport.
//!
//! The executor and the BLOB store talk to the cluster through the
//! [`HttpTransport`] trait, so tests can swap the network for a fake.
//! [`ReqwestTransport`] is the production implementation.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use log::debug;
use std::fmt;
use std::time::Instant;

use crate::error::{CrateLinkError, Result};
use crate::models::HttpVersion;
use crate::timeouts::CrateLinkTimeouts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
            HttpMethod::Put => f.write_str("PUT"),
        }
    }
}

/// A single request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Bytes>,
    pub content_type: Option<&'static str>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
            content_type: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body.into()),
            content_type: Some("application/json"),
        }
    }

    pub fn put(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            method: HttpMethod::Put,
            url: url.into(),
            body: Some(body.into()),
            content_type: None,
        }
    }
}

/// Status and fully buffered body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the complete response.
///
/// Implementations must buffer the whole body before returning. Transport
/// failures (connect, timeout, broken stream) are returned as errors; any
/// HTTP status, including 4xx/5xx, is a successful `HttpResponse`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a keep-alive client with the given timeouts and HTTP version.
    pub fn with_config(timeouts: &CrateLinkTimeouts, http_version: HttpVersion) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeouts.receive_timeout)
            .connect_timeout(timeouts.connection_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(timeouts.pool_idle_timeout);

        builder = match http_version {
            HttpVersion::Http1 => {
                debug!("[CLIENT] Using HTTP/1.1 only");
                builder.http1_only()
            }
            HttpVersion::Http2 => {
                debug!("[CLIENT] Using HTTP/2 with prior knowledge");
                builder.http2_prior_knowledge()
            }
            HttpVersion::Auto => {
                debug!("[CLIENT] Using automatic HTTP version negotiation");
                builder
            }
        };

        let client = builder
            .build()
            .map_err(|e| CrateLinkError::ConfigurationError(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut req_builder = self.client.request(method, &request.url);
        if let Some(content_type) = request.content_type {
            req_builder = req_builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let start = Instant::now();
        let mut response = req_builder.send().await?;
        let status = response.status().as_u16();

        // Buffer the whole body; nothing is parsed until the stream ends
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        debug!(
            "[LINK_HTTP] {} {} status={} bytes={} duration_ms={}",
            request.method,
            request.url,
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(HttpResponse::new(status, body.freeze()))
    }
}
