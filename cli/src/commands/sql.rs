use cratedb_cli::{CLIError, OutputFormatter, Result};
use cratedb_link::CrateLinkClient;
use serde_json::Value as JsonValue;
use std::io::Write;

/// Parse the `--args` JSON array; absent means no arguments
pub fn parse_args(raw: Option<&str>) -> Result<Vec<JsonValue>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<JsonValue>(raw) {
        Ok(JsonValue::Array(args)) => Ok(args),
        Ok(_) => Err(CLIError::ParseError("--args must be a JSON array".into())),
        Err(e) => Err(CLIError::ParseError(format!("--args is not valid JSON: {}", e))),
    }
}

pub async fn handle_sql<W: Write>(
    client: &CrateLinkClient,
    formatter: &OutputFormatter,
    statement: &str,
    args: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let args = parse_args(args)?;
    let result = client.execute_with_args(statement, args).await?;
    writeln!(out, "{}", formatter.format_result(&result)?)?;
    Ok(())
}
