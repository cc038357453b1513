//! Content-addressed BLOB storage.
//!
//! Objects live under `/_blobs/<table>/<sha1>`; the key of an object is
//! always the SHA-1 digest of its bytes, so the same content maps to the
//! same handle and is stored at most once.

use bytes::Bytes;
use log::{debug, warn};
use sha1::{Digest, Sha1};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{CrateLinkError, Result};
use crate::models::BlobHandle;
use crate::pool::ConnectionPool;
use crate::transport::{HttpRequest, HttpTransport};

const STATUS_NOT_FOUND: u16 = 404;
const STATUS_CONFLICT: u16 = 409;

/// Lowercase hex SHA-1 of `data`, the key a BLOB is stored under.
///
/// # Examples
///
/// ```rust
/// assert_eq!(
///     cratedb_link::blob::content_hash(b"hello"),
///     "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
/// );
/// ```
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Uploads and downloads BLOBs through the pool's nodes.
#[derive(Clone)]
pub struct BlobStore {
    pool: Arc<ConnectionPool>,
    transport: Arc<dyn HttpTransport>,
}

impl BlobStore {
    pub(crate) fn new(pool: Arc<ConnectionPool>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { pool, transport }
    }

    /// Store `data` in `table`.
    ///
    /// Returns [`CrateLinkError::BlobConflict`] (carrying the hash) when the
    /// server already holds this content. Any other status counts as stored.
    pub async fn put(&self, table: &str, data: Bytes) -> Result<BlobHandle> {
        let handle = BlobHandle::new(table, content_hash(&data));
        let url = self.pool.blob_url(table, &handle.hash);
        let size = data.len();

        let start = Instant::now();
        let response = self.transport.send(HttpRequest::put(url.clone(), data)).await?;
        debug!(
            "[LINK_BLOB] PUT {} status={} bytes={} duration_ms={}",
            url,
            response.status,
            size,
            start.elapsed().as_millis()
        );

        if response.status == STATUS_CONFLICT {
            return Err(CrateLinkError::BlobConflict {
                table: handle.table,
                hash: handle.hash,
            });
        }
        if !response.is_success() {
            warn!(
                "[LINK_BLOB] Upload of {} answered with status={}, reporting as stored",
                handle, response.status
            );
        }

        Ok(handle)
    }

    /// Read the file at `path` fully into memory and store it.
    ///
    /// A read failure is returned as [`CrateLinkError::FileError`] before any
    /// request is made.
    pub async fn put_file(&self, table: &str, path: &Path) -> Result<BlobHandle> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| CrateLinkError::FileError {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("[LINK_BLOB] Read {} bytes from {}", data.len(), path.display());
        self.put(table, Bytes::from(data)).await
    }

    /// Fetch the content stored under `hash`.
    ///
    /// 404 is reported as [`CrateLinkError::BlobNotFound`], any other
    /// non-success status as [`CrateLinkError::ServerError`].
    pub async fn get(&self, table: &str, hash: &str) -> Result<Bytes> {
        let url = self.pool.blob_url(table, hash);

        let start = Instant::now();
        let response = self.transport.send(HttpRequest::get(url.clone())).await?;
        debug!(
            "[LINK_BLOB] GET {} status={} bytes={} duration_ms={}",
            url,
            response.status,
            response.body.len(),
            start.elapsed().as_millis()
        );

        match response.status {
            STATUS_NOT_FOUND => Err(CrateLinkError::BlobNotFound {
                table: table.to_string(),
                hash: hash.to_string(),
            }),
            _ if response.is_success() => Ok(response.body),
            status => Err(CrateLinkError::ServerError {
                status_code: status,
                code: None,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            }),
        }
    }
}
