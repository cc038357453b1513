use crate::args::Cli;
use cratedb_cli::{CLIConfiguration, OutputFormat, Result};
use cratedb_link::{ConnectionPool, CrateLinkClient};
use log::debug;

/// Output format: `--json` wins over `--format`, which wins over the config file
pub fn resolve_format(cli: &Cli, config: &CLIConfiguration) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else {
        cli.format.unwrap_or_else(|| config.output_format())
    }
}

/// Build the client from flags, falling back to the config file
pub fn create_client(cli: &Cli, config: &CLIConfiguration) -> Result<CrateLinkClient> {
    let pool = match (cli.url.as_deref(), cli.host.as_deref()) {
        (Some(url), _) => ConnectionPool::parse(url)?,
        (None, Some(host)) => ConnectionPool::from_host(host, Some(cli.port))?,
        (None, None) => ConnectionPool::parse(&config.server_url())?,
    };
    debug!("[CLI] Connecting to {:?}", pool.nodes());

    let client = CrateLinkClient::builder()
        .pool(pool)
        .timeouts(config.to_timeouts(cli.timeout))
        .http_version(config.http_version())
        .build()?;
    Ok(client)
}
