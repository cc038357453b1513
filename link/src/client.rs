//! Main CrateDB client with builder pattern.
//!
//! Provides the primary interface for running statements and BLOB
//! operations against a cluster.

use bytes::Bytes;
use log::debug;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    blob::BlobStore,
    error::{CrateLinkError, Result},
    models::{BlobHandle, HttpVersion, Record, ResultSet},
    pool::ConnectionPool,
    query::QueryExecutor,
    statement::{self, PreparedStatement, TableSchema},
    timeouts::CrateLinkTimeouts,
    transport::{HttpTransport, ReqwestTransport},
};

/// CrateDB client.
///
/// Cheap to clone; clones share the node list and the HTTP connection pool.
/// Use [`CrateLinkClientBuilder`] for custom configuration or
/// [`CrateLinkClient::connect`] for the defaults.
///
/// # Examples
///
/// ```rust,no_run
/// use cratedb_link::{CrateLinkClient, Record};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CrateLinkClient::connect("localhost", Some(4200))?;
///
/// client
///     .insert("people", &Record::new().set("name", "Ada").set("age", 30))
///     .await?;
///
/// let result = client.execute("SELECT name, age FROM people").await?;
/// for row in &result.json {
///     println!("{:?}", row.get("name"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CrateLinkClient {
    pool: Arc<ConnectionPool>,
    query_executor: QueryExecutor,
    blob_store: BlobStore,
}

impl CrateLinkClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> CrateLinkClientBuilder {
        CrateLinkClientBuilder::new()
    }

    /// Client with default settings.
    ///
    /// With a `port`, connects to `http://<host>:<port>`. Without one, `host`
    /// is taken as a URL or a comma-separated list of node URLs.
    pub fn connect(host: &str, port: Option<u16>) -> Result<Self> {
        Self::builder()
            .pool(ConnectionPool::from_host(host, port)?)
            .build()
    }

    /// Nodes this client sends requests to
    pub fn nodes(&self) -> &[String] {
        self.pool.nodes()
    }

    /// Execute a statement without arguments.
    ///
    /// Sends exactly the same request as `execute_with_args(sql, vec![])`.
    pub async fn execute(&self, sql: &str) -> Result<ResultSet> {
        self.execute_with_args(sql, Vec::new()).await
    }

    /// Execute a statement with positional `?` arguments
    pub async fn execute_with_args(&self, sql: &str, args: Vec<JsonValue>) -> Result<ResultSet> {
        self.query_executor.execute(sql, args).await
    }

    /// Execute a statement built by [`crate::statement`]
    pub async fn execute_prepared(&self, prepared: PreparedStatement) -> Result<ResultSet> {
        self.query_executor.execute(&prepared.sql, prepared.args).await
    }

    /// `INSERT INTO <table> ("col",...) VALUES (?,...)` with the record's
    /// values as arguments.
    pub async fn insert(&self, table: &str, record: &Record) -> Result<ResultSet> {
        require_table(table)?;
        require_record(record)?;
        self.execute_prepared(statement::build_insert_statement(table, record)?)
            .await
    }

    /// `UPDATE <table> SET col = 'value',... WHERE <where_clause>`.
    ///
    /// Values are inlined as unescaped string literals and `where_clause` is
    /// raw SQL. Do not pass untrusted input.
    pub async fn update(&self, table: &str, record: &Record, where_clause: &str) -> Result<ResultSet> {
        require_table(table)?;
        require_record(record)?;
        require_where(where_clause)?;
        self.execute_prepared(statement::build_update_statement(table, record, where_clause)?)
            .await
    }

    /// `DELETE FROM <table> WHERE <where_clause>`; the clause is raw SQL.
    pub async fn delete(&self, table: &str, where_clause: &str) -> Result<ResultSet> {
        require_table(table)?;
        require_where(where_clause)?;
        self.execute_prepared(statement::build_delete_statement(table, where_clause))
            .await
    }

    pub async fn create(&self, schema: &TableSchema) -> Result<ResultSet> {
        if schema.name.trim().is_empty() {
            return Err(CrateLinkError::invalid_input("Table schema is not defined"));
        }
        self.execute_prepared(statement::build_create_table_statement(schema))
            .await
    }

    /// Create a table from `{"table": {"column": "type"}}`; only the first
    /// table in the object is used.
    pub async fn create_from_json(&self, schema: &JsonValue) -> Result<ResultSet> {
        let schema = TableSchema::from_json(schema)
            .ok_or_else(|| CrateLinkError::invalid_input("Table schema is not defined"))?;
        self.create(&schema).await
    }

    pub async fn drop(&self, table: &str) -> Result<ResultSet> {
        require_table(table)?;
        self.execute_prepared(statement::build_drop_statement(table, false))
            .await
    }

    pub async fn create_blob_table(&self, table: &str, replicas: u32, shards: u32) -> Result<ResultSet> {
        require_table(table)?;
        self.execute_prepared(statement::build_create_blob_table_statement(table, shards, replicas))
            .await
    }

    pub async fn drop_blob_table(&self, table: &str) -> Result<ResultSet> {
        require_table(table)?;
        self.execute_prepared(statement::build_drop_statement(table, true))
            .await
    }

    /// Upload `data` to a BLOB table.
    ///
    /// If identical content is already stored the result is
    /// [`CrateLinkError::BlobConflict`], whose hash is still usable.
    pub async fn insert_blob(&self, table: &str, data: impl Into<Bytes>) -> Result<BlobHandle> {
        require_table(table)?;
        self.blob_store.put(table, data.into()).await
    }

    /// Upload the contents of a file. Read errors are returned as
    /// [`CrateLinkError::FileError`] without touching the network.
    pub async fn insert_blob_file(&self, table: &str, path: impl AsRef<Path>) -> Result<BlobHandle> {
        require_table(table)?;
        self.blob_store.put_file(table, path.as_ref()).await
    }

    pub async fn get_blob(&self, table: &str, hash: &str) -> Result<Bytes> {
        require_table(table)?;
        if hash.trim().is_empty() {
            return Err(CrateLinkError::invalid_input("Blob hash is not specified"));
        }
        self.blob_store.get(table, hash).await
    }
}

fn require_table(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(CrateLinkError::invalid_input("Table name is not specified"));
    }
    Ok(())
}

fn require_record(record: &Record) -> Result<()> {
    if record.is_empty() {
        return Err(CrateLinkError::invalid_input("Record entry is not defined"));
    }
    Ok(())
}

fn require_where(where_clause: &str) -> Result<()> {
    if where_clause.trim().is_empty() {
        return Err(CrateLinkError::invalid_input("Where clause is not defined"));
    }
    Ok(())
}

/// Builder for configuring [`CrateLinkClient`] instances.
pub struct CrateLinkClientBuilder {
    base_url: Option<String>,
    pool: Option<ConnectionPool>,
    timeouts: CrateLinkTimeouts,
    http_version: HttpVersion,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl CrateLinkClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            pool: None,
            timeouts: CrateLinkTimeouts::default(),
            http_version: HttpVersion::default(),
            transport: None,
        }
    }

    /// Node URL, or several separated by commas
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use a prebuilt node pool; takes precedence over `base_url`
    pub fn pool(mut self, pool: ConnectionPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the total per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    pub fn timeouts(mut self, timeouts: CrateLinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.http_version = version;
        self
    }

    /// Replace the reqwest-based transport, e.g. with an instrumented one.
    /// Timeouts and HTTP version are then the transport's business.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<CrateLinkClient> {
        let pool = match (self.pool, self.base_url) {
            (Some(pool), _) => pool,
            (None, Some(url)) => ConnectionPool::parse(&url)?,
            (None, None) => {
                return Err(CrateLinkError::ConfigurationError("base_url is required".into()))
            }
        };
        let pool = Arc::new(pool);

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_config(&self.timeouts, self.http_version)?),
        };

        debug!("[CLIENT] Configured nodes={:?}", pool.nodes());

        Ok(CrateLinkClient {
            query_executor: QueryExecutor::new(pool.clone(), transport.clone()),
            blob_store: BlobStore::new(pool.clone(), transport),
            pool,
        })
    }
}
