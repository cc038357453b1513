use clap::{Parser, Subcommand};
use cratedb_cli::OutputFormat;
use std::path::PathBuf;

/// CrateDB CLI - Terminal client for CrateDB
#[derive(Parser, Debug)]
#[command(name = "cratedb")]
#[command(version)]
#[command(about = "Command-line client for CrateDB's HTTP interface", long_about = None)]
pub struct Cli {
    /// Node URL (e.g., http://localhost:4200); several may be given separated by commas
    #[arg(short = 'u', long = "url", global = true)]
    pub url: Option<String>,

    /// Host address (alternative to URL)
    #[arg(short = 'H', long = "host", global = true)]
    pub host: Option<String>,

    /// Port number used with --host
    #[arg(short = 'p', long = "port", default_value_t = 4200, global = true)]
    pub port: u16,

    /// Configuration file path
    #[arg(long = "config", default_value = "~/.cratedb/config.toml", global = true)]
    pub config: PathBuf,

    /// Output format (defaults to the config file's [ui] format, then table)
    #[arg(long = "format", global = true)]
    pub format: Option<OutputFormat>,

    /// Enable JSON output (shorthand for --format=json)
    #[arg(long = "json", conflicts_with = "format", global = true)]
    pub json: bool,

    /// HTTP request timeout in seconds (defaults to the config file, then 30)
    #[arg(long = "timeout", value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a SQL statement
    Sql {
        /// Statement text; use `?` for positional arguments
        statement: String,

        /// Positional arguments as a JSON array, e.g. '["Ada", 30]'
        #[arg(long = "args", value_name = "JSON")]
        args: Option<String>,
    },

    /// Store and fetch BLOBs
    #[command(subcommand)]
    Blob(BlobCommand),

    /// Create a table from a JSON schema file: {"table": {"column": "type", ...}}
    Create {
        /// Path to the schema document
        schema: PathBuf,
    },

    /// Drop a table
    Drop {
        table: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlobCommand {
    /// Upload a file; prints its SHA-1 hash
    Put {
        table: String,
        file: PathBuf,
    },

    /// Download a BLOB by hash
    Get {
        table: String,
        hash: String,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Create a BLOB table
    CreateTable {
        table: String,

        #[arg(long = "shards", default_value_t = 3)]
        shards: u32,

        #[arg(long = "replicas", default_value_t = 0)]
        replicas: u32,
    },

    /// Drop a BLOB table
    DropTable {
        table: String,
    },
}
