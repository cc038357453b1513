//! Library entry point for cratedb-cli components.
//!
//! Exposes the formatter, configuration and error types so integration
//! tests can use them without going through the binary entry point.

pub mod config;
pub mod error;
pub mod formatter;

pub use config::CLIConfiguration;
pub use error::{CLIError, Result};
pub use formatter::{OutputFormat, OutputFormatter};
