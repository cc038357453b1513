//! # cratedb-link: CrateDB Client Library
//!
//! An async client for CrateDB's HTTP/JSON REST interface.
//!
//! ## Features
//!
//! - **Statement Execution**: Send SQL with positional `?` arguments to `/_sql`
//! - **Typed Results**: Rows keyed by column name, timestamp columns decoded
//! - **Statement Helpers**: `insert`, `update`, `delete` and DDL from plain records
//! - **BLOBs**: Content-addressed upload and download via `/_blobs`
//! - **Callbacks**: Every operation can also report through a callback
//! - **Multiple Nodes**: Requests are spread round-robin across the configured nodes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cratedb_link::{CrateLinkClient, Record};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CrateLinkClient::builder()
//!         .base_url("http://localhost:4200")
//!         .timeout(std::time::Duration::from_secs(30))
//!         .build()?;
//!
//!     client
//!         .create_from_json(&json!({"people": {"name": "string", "age": "integer"}}))
//!         .await?;
//!     client
//!         .insert("people", &Record::new().set("name", "Ada").set("age", 30))
//!         .await?;
//!
//!     let result = client
//!         .execute_with_args("SELECT name FROM people WHERE age > ?", vec![json!(18)])
//!         .await?;
//!     println!("Results: {:?}", result.json);
//!
//!     let handle = client.insert_blob("images", b"raw bytes".to_vec()).await?;
//!     let data = client.get_blob("images", &handle.hash).await?;
//!     assert_eq!(&data[..], b"raw bytes");
//!
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod callback;
pub mod client;
pub mod error;
pub mod models;
pub mod pool;
pub mod query;
pub mod statement;
pub mod timeouts;
pub mod transport;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use blob::{content_hash, BlobStore};
pub use callback::Callbacks;
pub use client::{CrateLinkClient, CrateLinkClientBuilder};
pub use error::{CrateLinkError, Result};
pub use models::{
    BlobHandle, ColumnType, CrateType, CrateValue, ErrorDetail, HttpVersion, Record, ResultSet,
    SqlRequest, SqlResponse, TypedRow,
};
pub use pool::ConnectionPool;
pub use query::QueryExecutor;
pub use statement::{PreparedStatement, TableSchema};
pub use timeouts::{CrateLinkTimeouts, CrateLinkTimeoutsBuilder};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
