//! SQL statement execution over HTTP.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{CrateLinkError, Result},
    models::{ResultSet, SqlRequest, SqlResponse},
    pool::ConnectionPool,
    transport::{HttpRequest, HttpTransport},
};

/// Sends statement envelopes to the `/_sql` endpoint and types the results.
#[derive(Clone)]
pub struct QueryExecutor {
    pool: Arc<ConnectionPool>,
    transport: Arc<dyn HttpTransport>,
}

impl QueryExecutor {
    pub(crate) fn new(pool: Arc<ConnectionPool>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { pool, transport }
    }

    /// Execute `sql` with positional `args` and return the typed result.
    ///
    /// The whole response body is buffered before it is parsed. A body that
    /// is not valid JSON is reported as [`CrateLinkError::SerializationError`]
    /// and never retried.
    pub async fn execute(&self, sql: &str, args: Vec<JsonValue>) -> Result<ResultSet> {
        let request = SqlRequest::new(sql, args);
        let body = serde_json::to_vec(&request)?;

        let sql_preview = if sql.len() > 80 {
            let mut end = 80;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        } else {
            sql.to_string()
        };
        debug!(
            "[LINK_QUERY] Starting query: \"{}\" (len={} args={})",
            sql_preview.replace('\n', " "),
            sql.len(),
            request.args.len()
        );

        let url = self.pool.sql_url();
        let start = Instant::now();
        let response = match self.transport.send(HttpRequest::post_json(url.clone(), body)).await {
            Ok(response) => response,
            Err(e) => {
                warn!("[LINK_HTTP] POST {} failed: {} duration_ms={}", url, e, start.elapsed().as_millis());
                return Err(e);
            }
        };
        let http_duration_ms = start.elapsed().as_millis();

        let parsed: SqlResponse = match serde_json::from_slice(&response.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    "[LINK_QUERY] Unparseable response: status={} error=\"{}\" sql=\"{}\"",
                    response.status, e, sql_preview
                );
                return Err(e.into());
            }
        };

        if let Some(error) = parsed.error {
            warn!(
                "[LINK_HTTP] Server error: status={} code={:?} message=\"{}\" duration_ms={}",
                response.status, error.code, error.message, http_duration_ms
            );
            return Err(CrateLinkError::ServerError {
                status_code: response.status,
                code: error.code,
                message: error.message,
            });
        }

        let result = ResultSet::from_response(parsed);
        debug!(
            "[LINK_QUERY] Success: status={} rows={} http_ms={} total_ms={}",
            response.status,
            result.row_count(),
            http_duration_ms,
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}
