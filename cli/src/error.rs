//! Error types for cratedb-cli
//!
//! Wraps library errors and adds the failures that only exist on the
//! command line: config files, local files and output formatting.

use cratedb_link::CrateLinkError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CLIError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CLIError {
    /// Error from cratedb-link
    LinkError(CrateLinkError),

    /// Configuration file error
    ConfigurationError(String),

    /// File I/O error
    FileError(String),

    /// Invalid argument or input document
    ParseError(String),

    /// Format error
    FormatError(String),
}

impl CLIError {
    fn format_link_error(err: &CrateLinkError) -> String {
        match err {
            CrateLinkError::ServerError {
                status_code,
                code: Some(code),
                message,
            } => format!("Server error ({}, code {}): {}", status_code, code, message),
            CrateLinkError::ServerError {
                status_code,
                code: None,
                message,
            } => format!("Server error ({}): {}", status_code, message),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CLIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLIError::LinkError(e) => write!(f, "{}", Self::format_link_error(e)),
            CLIError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            CLIError::FileError(msg) => write!(f, "File error: {}", msg),
            CLIError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            CLIError::FormatError(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for CLIError {}

impl From<CrateLinkError> for CLIError {
    fn from(err: CrateLinkError) -> Self {
        CLIError::LinkError(err)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(err: std::io::Error) -> Self {
        CLIError::FileError(err.to_string())
    }
}

impl From<toml::de::Error> for CLIError {
    fn from(err: toml::de::Error) -> Self {
        CLIError::ConfigurationError(format!("TOML parse error: {}", err))
    }
}
