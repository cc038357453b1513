//! Data models for cratedb-link.
//!
//! Wire structures of the `/_sql` endpoint, the value model used for
//! statement arguments and typed result rows, and the CrateDB type catalog.

pub mod blob_handle;
pub mod crate_type;
pub mod error_detail;
pub mod http_version;
pub mod record;
pub mod result_set;
pub mod sql_request;
pub mod sql_response;
pub mod value;


pub use blob_handle::BlobHandle;
pub use crate_type::{ColumnType, CrateType};
pub use error_detail::ErrorDetail;
pub use http_version::HttpVersion;
pub use record::Record;
pub use result_set::{ResultSet, TypedRow};
pub use sql_request::SqlRequest;
pub use sql_response::SqlResponse;
pub use value::CrateValue;
