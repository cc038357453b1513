use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Statement envelope POSTed to the `/_sql` endpoint.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::SqlRequest;
/// use serde_json::json;
///
/// let request = SqlRequest::new("SELECT name FROM people WHERE age > ?", vec![json!(30)]);
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"stmt":"SELECT name FROM people WHERE age > ?","args":[30]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlRequest {
    /// SQL text, with `?` positional placeholders
    pub stmt: String,

    /// Values bound to the placeholders, always sent (possibly empty)
    #[serde(default)]
    pub args: Vec<JsonValue>,
}

impl SqlRequest {
    pub fn new(stmt: impl Into<String>, args: Vec<JsonValue>) -> Self {
        Self {
            stmt: stmt.into(),
            args,
        }
    }
}
