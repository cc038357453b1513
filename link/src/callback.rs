//! Callback-style delivery of client results.
//!
//! Every [`CrateLinkClient`] operation is an async fn; that future is the
//! single completion primitive. This module adapts it for callers that
//! prefer a callback: the operation is spawned on the current Tokio runtime
//! and the callback receives its `Result` once it completes.
//!
//! # Example
//!
//! ```rust,no_run
//! use cratedb_link::{CrateLinkClient, Record};
//!
//! # async fn example() -> cratedb_link::Result<()> {
//! let client = CrateLinkClient::connect("localhost", Some(4200))?;
//!
//! client.callbacks().insert("people", Record::new().set("name", "Ada"), |result| {
//!     match result {
//!         Ok(result) => println!("inserted {:?} rows", result.rowcount),
//!         Err(e) => eprintln!("insert failed: {}", e),
//!     }
//! });
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use serde_json::Value as JsonValue;
use std::future::Future;
use std::path::Path;
use tokio::task::JoinHandle;

use crate::client::CrateLinkClient;
use crate::error::{CrateLinkError, Result};
use crate::models::{BlobHandle, Record, ResultSet};
use crate::statement::TableSchema;

/// Run `future` on the current runtime and hand its output to `callback`.
///
/// Must be called from within a Tokio runtime.
pub fn deliver<T, F, C>(future: F, callback: C) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
    C: FnOnce(Result<T>) + Send + 'static,
{
    tokio::spawn(async move { callback(future.await) })
}

/// Callback-last view of a [`CrateLinkClient`].
///
/// Each method returns the `JoinHandle` of the spawned operation; awaiting
/// it is optional.
#[derive(Clone)]
pub struct Callbacks {
    client: CrateLinkClient,
}

impl CrateLinkClient {
    pub fn callbacks(&self) -> Callbacks {
        Callbacks {
            client: self.clone(),
        }
    }
}

impl Callbacks {
    pub fn execute<C>(&self, sql: impl Into<String>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        self.execute_with_args(sql, Vec::new(), callback)
    }

    pub fn execute_with_args<C>(&self, sql: impl Into<String>, args: Vec<JsonValue>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let sql = sql.into();
        deliver(async move { client.execute_with_args(&sql, args).await }, callback)
    }

    pub fn insert<C>(&self, table: impl Into<String>, record: Record, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let table = table.into();
        deliver(async move { client.insert(&table, &record).await }, callback)
    }

    pub fn update<C>(
        &self,
        table: impl Into<String>,
        record: Record,
        where_clause: impl Into<String>,
        callback: C,
    ) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let (table, where_clause) = (table.into(), where_clause.into());
        deliver(
            async move { client.update(&table, &record, &where_clause).await },
            callback,
        )
    }

    pub fn delete<C>(&self, table: impl Into<String>, where_clause: impl Into<String>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let (table, where_clause) = (table.into(), where_clause.into());
        deliver(async move { client.delete(&table, &where_clause).await }, callback)
    }

    pub fn create<C>(&self, schema: TableSchema, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        deliver(async move { client.create(&schema).await }, callback)
    }

    pub fn drop<C>(&self, table: impl Into<String>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let table = table.into();
        deliver(async move { client.drop(&table).await }, callback)
    }

    pub fn create_blob_table<C>(&self, table: impl Into<String>, replicas: u32, shards: u32, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let table = table.into();
        deliver(
            async move { client.create_blob_table(&table, replicas, shards).await },
            callback,
        )
    }

    pub fn drop_blob_table<C>(&self, table: impl Into<String>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<ResultSet>) + Send + 'static,
    {
        let client = self.client.clone();
        let table = table.into();
        deliver(async move { client.drop_blob_table(&table).await }, callback)
    }

    pub fn insert_blob<C>(&self, table: impl Into<String>, data: impl Into<Bytes>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<BlobHandle>) + Send + 'static,
    {
        let client = self.client.clone();
        let (table, data) = (table.into(), data.into());
        deliver(async move { client.insert_blob(&table, data).await }, callback)
    }

    /// Read `path` now and upload it in the background.
    ///
    /// The table name is checked and the file is read on the calling thread
    /// with blocking I/O. Either failure is returned from this call and the
    /// callback is never invoked. Use [`CrateLinkClient::insert_blob_file`]
    /// to read the file asynchronously.
    pub fn insert_blob_file<C>(
        &self,
        table: impl Into<String>,
        path: impl AsRef<Path>,
        callback: C,
    ) -> Result<JoinHandle<()>>
    where
        C: FnOnce(Result<BlobHandle>) + Send + 'static,
    {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(CrateLinkError::invalid_input("Table name is not specified"));
        }
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| CrateLinkError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.insert_blob(table, data, callback))
    }

    pub fn get_blob<C>(&self, table: impl Into<String>, hash: impl Into<String>, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(Result<Bytes>) + Send + 'static,
    {
        let client = self.client.clone();
        let (table, hash) = (table.into(), hash.into());
        deliver(async move { client.get_blob(&table, &hash).await }, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn client(transport: Arc<MockTransport>) -> CrateLinkClient {
        CrateLinkClient::builder()
            .base_url("http://localhost:4200")
            .transport(transport)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_callback_receives_result() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"cols":["n"],"rows":[[1]]}"#));
        let (tx, rx) = oneshot::channel();

        client(transport)
            .callbacks()
            .execute("SELECT 1 AS n", move |result| {
                let _ = tx.send(result);
            })
            .await
            .unwrap();

        let result = rx.await.unwrap().unwrap();
        assert_eq!(result.json.len(), 1);
    }

    #[tokio::test]
    async fn test_callback_receives_validation_error() {
        let transport = Arc::new(MockTransport::new());
        let (tx, rx) = oneshot::channel();

        client(transport.clone())
            .callbacks()
            .insert("", Record::new().set("a", 1), move |result| {
                let _ = tx.send(result);
            })
            .await
            .unwrap();

        assert!(matches!(rx.await.unwrap(), Err(CrateLinkError::InvalidInput(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_callback_receives_parse_error() {
        let transport = Arc::new(MockTransport::new().respond(200, "{"));
        let (tx, rx) = oneshot::channel();

        client(transport)
            .callbacks()
            .execute("SELECT 1", move |result| {
                let _ = tx.send(result);
            })
            .await
            .unwrap();

        assert!(matches!(rx.await.unwrap(), Err(CrateLinkError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_blob_file_read_error_escapes_callback() {
        let transport = Arc::new(MockTransport::new());
        let result = client(transport).callbacks().insert_blob_file(
            "images",
            "/definitely/not/here.bin",
            |_| panic!("callback must not run"),
        );
        assert!(matches!(result, Err(CrateLinkError::FileError { .. })));
    }

    #[tokio::test]
    async fn test_blob_file_empty_table_checked_before_read() {
        let transport = Arc::new(MockTransport::new());
        let result = client(transport.clone()).callbacks().insert_blob_file(
            "  ",
            "/definitely/not/here.bin",
            |_| panic!("callback must not run"),
        );
        assert!(matches!(result, Err(CrateLinkError::InvalidInput(_))));
        assert!(transport.requests().is_empty());
    }
}
