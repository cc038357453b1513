//! Cluster node selection.
//!
//! Holds the base URLs of the cluster nodes and hands one out per request,
//! round-robin. HTTP connection reuse itself is left to the transport.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{CrateLinkError, Result};

const DEFAULT_SCHEME: &str = "http://";

/// Round-robin set of CrateDB node URLs.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::ConnectionPool;
///
/// let pool = ConnectionPool::parse("node1:4200, http://node2:4200/").unwrap();
/// assert_eq!(pool.nodes(), ["http://node1:4200", "http://node2:4200"]);
/// assert_eq!(pool.sql_url(), "http://node1:4200/_sql?types");
/// assert_eq!(pool.sql_url(), "http://node2:4200/_sql?types");
/// ```
#[derive(Debug)]
pub struct ConnectionPool {
    nodes: Vec<String>,
    cursor: AtomicUsize,
}

impl ConnectionPool {
    pub fn new<I, S>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes: Vec<String> = nodes
            .into_iter()
            .map(|n| normalize_node(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();

        if nodes.is_empty() {
            return Err(CrateLinkError::ConfigurationError(
                "at least one node URL is required".into(),
            ));
        }

        Ok(Self {
            nodes,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Parse a connect string: one or more node addresses separated by
    /// commas or whitespace. Addresses without a scheme get `http://`.
    pub fn parse(connect: &str) -> Result<Self> {
        Self::new(connect.split(|c: char| c == ',' || c.is_whitespace()))
    }

    /// `host` plus an explicit `port` becomes `http://host:port`; without a
    /// port, `host` is parsed as a connect string.
    pub fn from_host(host: &str, port: Option<u16>) -> Result<Self> {
        match port {
            Some(port) => Self::new([format!("{}{}:{}", DEFAULT_SCHEME, host.trim(), port)]),
            None => Self::parse(host),
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Next node in round-robin order
    pub fn next_node(&self) -> &str {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.nodes.len();
        &self.nodes[idx]
    }

    /// SQL endpoint of the next node. `?types` makes the server report
    /// `col_types`, which timestamp decoding relies on.
    pub fn sql_url(&self) -> String {
        format!("{}/_sql?types", self.next_node())
    }

    /// BLOB base URL of the next node; append `<table>/<hash>`
    pub fn blob_base_url(&self) -> String {
        format!("{}/_blobs/", self.next_node())
    }

    pub fn blob_url(&self, table: &str, hash: &str) -> String {
        format!("{}{}/{}", self.blob_base_url(), table, hash)
    }
}

fn normalize_node(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_and_port() {
        let pool = ConnectionPool::from_host("localhost", Some(4200)).unwrap();
        assert_eq!(pool.nodes(), ["http://localhost:4200"]);
    }

    #[test]
    fn test_url_without_port_used_as_is() {
        let pool = ConnectionPool::from_host("https://crate.example.com:4200/", None).unwrap();
        assert_eq!(pool.nodes(), ["https://crate.example.com:4200"]);
    }

    #[test]
    fn test_round_robin() {
        let pool = ConnectionPool::parse("a:4200,b:4200 c:4200").unwrap();
        let picked: Vec<String> = (0..4).map(|_| pool.next_node().to_string()).collect();
        assert_eq!(
            picked,
            vec!["http://a:4200", "http://b:4200", "http://c:4200", "http://a:4200"]
        );
    }

    #[test]
    fn test_blob_url() {
        let pool = ConnectionPool::parse("localhost:4200").unwrap();
        assert_eq!(pool.blob_url("images", "abc"), "http://localhost:4200/_blobs/images/abc");
    }

    #[test]
    fn test_empty_connect_string_rejected() {
        assert!(matches!(
            ConnectionPool::parse(" , "),
            Err(CrateLinkError::ConfigurationError(_))
        ));
    }
}
