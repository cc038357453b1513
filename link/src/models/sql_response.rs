use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::error_detail::ErrorDetail;

/// Raw body of a `/_sql` response, exactly as the server sends it.
///
/// `rows` is absent for statements that produce no result rows (CrateDB
/// omits it on `CREATE BLOB TABLE`, for instance); `col_types` is only
/// present when the request asked for types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlResponse {
    #[serde(default)]
    pub cols: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_types: Option<Vec<JsonValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<JsonValue>>>,

    /// Number of rows returned or affected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowcount: Option<i64>,

    /// Server-side execution time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Present instead of the fields above when the statement failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}
