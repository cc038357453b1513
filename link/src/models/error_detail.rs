use serde::{Deserialize, Serialize};

/// Error envelope returned by CrateDB for failed statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error message
    pub message: String,

    /// CrateDB error code (e.g. 4041 for an unknown table)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}
