//! Error types for cratedb-link.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cratedb-link operations
pub type Result<T> = std::result::Result<T, CrateLinkError>;

/// Errors that can occur while talking to a CrateDB cluster.
#[derive(Error, Debug)]
pub enum CrateLinkError {
    /// A required argument was missing or empty. Never reaches the network.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection refused, DNS failure, broken body stream and the like.
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// The response body was not the JSON we expected.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The server answered with CrateDB's `{"error": {...}}` envelope or an
    /// unexpected status.
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        status_code: u16,
        code: Option<i64>,
        message: String,
    },

    /// HTTP 409 on upload. The object is stored under `hash` already.
    #[error("error 409: already exists ({table}/{hash})")]
    BlobConflict { table: String, hash: String },

    #[error("blob not found: {table}/{hash}")]
    BlobNotFound { table: String, hash: String },

    #[error("Failed to read {}: {source}", path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CrateLinkError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        CrateLinkError::InvalidInput(msg.into())
    }

    /// Content hash carried by BLOB errors.
    ///
    /// A conflict still tells the caller where the content lives, so it can be
    /// treated as "already stored".
    pub fn blob_hash(&self) -> Option<&str> {
        match self {
            CrateLinkError::BlobConflict { hash, .. } | CrateLinkError::BlobNotFound { hash, .. } => {
                Some(hash)
            }
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, CrateLinkError::BlobConflict { .. })
    }
}

impl From<reqwest::Error> for CrateLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CrateLinkError::TimeoutError(err.to_string())
        } else if err.is_builder() {
            CrateLinkError::ConfigurationError(err.to_string())
        } else {
            CrateLinkError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CrateLinkError {
    fn from(err: serde_json::Error) -> Self {
        CrateLinkError::SerializationError(err.to_string())
    }
}
