//! CrateDB CLI - Terminal client for CrateDB
//!
//! # Usage
//!
//! ```bash
//! # Run a statement
//! cratedb -u http://localhost:4200 sql "SELECT name FROM sys.nodes"
//!
//! # Positional arguments, JSON output
//! cratedb --json sql "SELECT * FROM people WHERE age > ?" --args '[18]'
//!
//! # BLOBs
//! cratedb blob create-table images --shards 3 --replicas 0
//! cratedb blob put images ./photo.jpg
//! cratedb blob get images <sha1> -o photo.jpg
//! ```

use clap::Parser;
use log::LevelFilter;

use cratedb_cli::{CLIConfiguration, OutputFormatter, Result};

mod args;
mod commands;
mod connect;

use args::{Cli, Command};
use commands::{
    blob::handle_blob,
    sql::handle_sql,
    table::{handle_create, handle_drop},
};
use connect::{create_client, resolve_format};

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = CLIConfiguration::load(&cli.config)?;
    let formatter = OutputFormatter::new(resolve_format(&cli, &config));
    let client = create_client(&cli, &config)?;
    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Sql { statement, args } => {
            handle_sql(&client, &formatter, statement, args.as_deref(), &mut stdout).await
        }
        Command::Blob(command) => handle_blob(&client, &formatter, command, &mut stdout).await,
        Command::Create { schema } => handle_create(&client, &formatter, schema, &mut stdout).await,
        Command::Drop { table } => handle_drop(&client, &formatter, table, &mut stdout).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
