use crate::args::BlobCommand;
use cratedb_cli::{CLIError, OutputFormat, OutputFormatter, Result};
use cratedb_link::{BlobHandle, CrateLinkClient, CrateLinkError};
use log::info;
use std::io::Write;
use std::path::Path;

pub async fn handle_blob<W: Write>(
    client: &CrateLinkClient,
    formatter: &OutputFormatter,
    command: &BlobCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        BlobCommand::Put { table, file } => put(client, formatter, table, file, out).await,
        BlobCommand::Get {
            table,
            hash,
            output,
        } => get(client, table, hash, output.as_deref(), out).await,
        BlobCommand::CreateTable {
            table,
            shards,
            replicas,
        } => {
            let result = client.create_blob_table(table, *replicas, *shards).await?;
            writeln!(out, "{}", formatter.format_result(&result)?)?;
            Ok(())
        }
        BlobCommand::DropTable { table } => {
            let result = client.drop_blob_table(table).await?;
            writeln!(out, "{}", formatter.format_result(&result)?)?;
            Ok(())
        }
    }
}

/// Upload a file. Content that is already stored is reported with its hash
/// and counts as success.
async fn put<W: Write>(
    client: &CrateLinkClient,
    formatter: &OutputFormatter,
    table: &str,
    file: &Path,
    out: &mut W,
) -> Result<()> {
    let (handle, created) = match client.insert_blob_file(table, file).await {
        Ok(handle) => (handle, true),
        Err(CrateLinkError::BlobConflict { table, hash }) => (BlobHandle::new(table, hash), false),
        Err(e) => return Err(e.into()),
    };

    match formatter.format() {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "table": handle.table,
                "hash": handle.hash,
                "created": created,
            });
            let text =
                serde_json::to_string_pretty(&json).map_err(|e| CLIError::FormatError(e.to_string()))?;
            writeln!(out, "{}", text)?;
        }
        OutputFormat::Table if created => writeln!(out, "{}", handle.hash)?,
        OutputFormat::Table => writeln!(out, "{} (already exists)", handle.hash)?,
    }
    Ok(())
}

async fn get<W: Write>(
    client: &CrateLinkClient,
    table: &str,
    hash: &str,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let data = client.get_blob(table, hash).await?;
    match output {
        Some(path) => {
            std::fs::write(path, &data).map_err(|e| {
                CLIError::FileError(format!("Failed to write {}: {}", path.display(), e))
            })?;
            info!("[CLI] Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            out.write_all(&data)?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{client, FixedTransport};
    use cratedb_link::{content_hash, HttpMethod};
    use std::fs;

    fn blob_file(contents: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_put_prints_hash() {
        let (_dir, path) = blob_file(b"hello");
        let transport = FixedTransport::new(201, "");
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let mut out = Vec::new();

        let command = BlobCommand::Put {
            table: "images".into(),
            file: path,
        };
        handle_blob(&client(transport.clone()), &formatter, &command, &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", content_hash(b"hello")));
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].method, HttpMethod::Put);
    }

    #[tokio::test]
    async fn test_put_conflict_is_success() {
        let (_dir, path) = blob_file(b"hello");
        let transport = FixedTransport::new(409, "");
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let mut out = Vec::new();

        let command = BlobCommand::Put {
            table: "images".into(),
            file: path,
        };
        handle_blob(&client(transport), &formatter, &command, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{} (already exists)\n", content_hash(b"hello"))
        );
    }

    #[tokio::test]
    async fn test_get_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let transport = FixedTransport::new(200, b"\x00\x01binary".to_vec());
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let mut out = Vec::new();

        let command = BlobCommand::Get {
            table: "images".into(),
            hash: content_hash(b"\x00\x01binary"),
            output: Some(target.clone()),
        };
        handle_blob(&client(transport), &formatter, &command, &mut out)
            .await
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(fs::read(&target).unwrap(), b"\x00\x01binary");
    }

    #[tokio::test]
    async fn test_get_missing_blob() {
        let transport = FixedTransport::new(404, "");
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let mut out = Vec::new();

        let command = BlobCommand::Get {
            table: "images".into(),
            hash: content_hash(b"absent"),
            output: None,
        };
        let err = handle_blob(&client(transport), &formatter, &command, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CLIError::LinkError(CrateLinkError::BlobNotFound { .. })
        ));
    }
}
