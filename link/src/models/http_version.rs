use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// HTTP protocol version used by the default transport.
///
/// # Example
///
/// ```rust
/// use cratedb_link::{CrateLinkClient, HttpVersion};
///
/// let client = CrateLinkClient::builder()
///     .base_url("http://localhost:4200")
///     .http_version(HttpVersion::Http1)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HttpVersion {
    /// HTTP/1.1, what CrateDB's REST endpoint speaks out of the box
    #[default]
    #[serde(rename = "http1", alias = "http/1.1", alias = "1.1")]
    Http1,

    /// HTTP/2 with prior knowledge
    #[serde(rename = "http2", alias = "http/2", alias = "2")]
    Http2,

    /// Let reqwest negotiate
    #[serde(rename = "auto")]
    Auto,
}

impl FromStr for HttpVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http1" | "http/1" | "http/1.1" | "1.1" => Ok(HttpVersion::Http1),
            "http2" | "http/2" | "2" => Ok(HttpVersion::Http2),
            "auto" => Ok(HttpVersion::Auto),
            other => Err(format!("unknown http version '{}'", other)),
        }
    }
}
