//! Timeout configuration for the HTTP transport.
//!
//! The library itself never cancels a statement; these values are handed to
//! the underlying `reqwest::Client`, which enforces them per request.

use std::time::Duration;

/// Timeouts applied by the default transport.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::CrateLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = CrateLinkTimeouts::default();
///
/// // Long-running analytical queries
/// let timeouts = CrateLinkTimeouts::builder()
///     .receive_timeout(Duration::from_secs(600))
///     .build();
///
/// // Aggressive timeouts for a local node
/// let timeouts = CrateLinkTimeouts::fast();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Total time allowed for a request, from send until the body is buffered.
    /// Default: 30 seconds
    pub receive_timeout: Duration,

    /// How long an idle keep-alive connection stays in the pool.
    /// Default: 90 seconds
    pub pool_idle_timeout: Duration,
}

impl Default for CrateLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl CrateLinkTimeouts {
    pub fn builder() -> CrateLinkTimeoutsBuilder {
        CrateLinkTimeoutsBuilder::new()
    }

    /// Short timeouts for a node on localhost.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            receive_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(30),
        }
    }

    /// Long timeouts for remote clusters and large BLOB transfers.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            receive_timeout: Duration::from_secs(300),
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Builder for custom [`CrateLinkTimeouts`].
#[derive(Debug, Clone)]
pub struct CrateLinkTimeoutsBuilder {
    timeouts: CrateLinkTimeouts,
}

impl CrateLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: CrateLinkTimeouts::default(),
        }
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    pub fn receive_timeout_secs(self, secs: u64) -> Self {
        self.receive_timeout(Duration::from_secs(secs))
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.pool_idle_timeout = timeout;
        self
    }

    pub fn build(self) -> CrateLinkTimeouts {
        self.timeouts
    }
}
