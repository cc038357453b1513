use cratedb_cli::{CLIError, OutputFormatter, Result};
use cratedb_link::CrateLinkClient;
use serde_json::Value as JsonValue;
use std::io::Write;
use std::path::Path;

/// Read a `{"table": {"column": "type"}}` document
pub fn read_schema(path: &Path) -> Result<JsonValue> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CLIError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| CLIError::ParseError(format!("{} is not valid JSON: {}", path.display(), e)))
}

pub async fn handle_create<W: Write>(
    client: &CrateLinkClient,
    formatter: &OutputFormatter,
    schema_path: &Path,
    out: &mut W,
) -> Result<()> {
    let schema = read_schema(schema_path)?;
    let result = client.create_from_json(&schema).await?;
    writeln!(out, "{}", formatter.format_result(&result)?)?;
    Ok(())
}

pub async fn handle_drop<W: Write>(
    client: &CrateLinkClient,
    formatter: &OutputFormatter,
    table: &str,
    out: &mut W,
) -> Result<()> {
    let result = client.drop(table).await?;
    writeln!(out, "{}", formatter.format_result(&result)?)?;
    Ok(())
}
