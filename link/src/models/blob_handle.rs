use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a stored BLOB: the table and the SHA-1 digest of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobHandle {
    pub table: String,
    /// Lowercase hex SHA-1 of the stored bytes
    pub hash: String,
}

impl BlobHandle {
    pub fn new(table: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            hash: hash.into(),
        }
    }

    /// Path of the object below the server root, e.g. `_blobs/images/3f78...`
    ///
    /// For handing a download link to something outside this client, such as
    /// a browser or a reverse proxy in front of the cluster.
    pub fn path(&self) -> String {
        format!("_blobs/{}/{}", self.table, self.hash)
    }
}

impl fmt::Display for BlobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.table, self.hash)
    }
}
