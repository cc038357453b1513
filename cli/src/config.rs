//! Configuration file management
//!
//! `CLIConfiguration` is read from `~/.cratedb/config.toml`; command-line
//! flags take precedence over it.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! url = "http://localhost:4200"  # one node, or several separated by commas
//! timeout = 30                   # request timeout in seconds
//! connection_timeout = 10        # TCP connect timeout in seconds
//! http_version = "http1"         # HTTP version: "http1", "http2", "auto"
//!
//! [ui]
//! format = "table"               # table, json
//! ```

use cratedb_link::{CrateLinkTimeouts, HttpVersion};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CLIError, Result};
use crate::formatter::OutputFormat;

pub const DEFAULT_CONFIG_PATH: &str = "~/.cratedb/config.toml";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4200";

/// CLI configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct CLIConfiguration {
    /// Server connection settings
    pub server: Option<ServerConfig>,

    /// UI preferences
    pub ui: Option<UIConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Node URL(s), e.g. http://localhost:4200
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// HTTP version preference: "http1", "http2", "auto" (default: "http1")
    #[serde(default = "default_http_version")]
    pub http_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UIConfig {
    /// Output format: table, json
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_http_version() -> String {
    "http1".to_string()
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for CLIConfiguration {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig {
                url: Some(DEFAULT_SERVER_URL.to_string()),
                timeout: default_timeout(),
                connection_timeout: default_connection_timeout(),
                http_version: default_http_version(),
            }),
            ui: Some(UIConfig {
                format: default_format(),
            }),
        }
    }
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or(DEFAULT_CONFIG_PATH);
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

impl CLIConfiguration {
    /// Load configuration from file
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_config_path(path);
        let path = &expanded_path;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CLIError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: CLIConfiguration = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn resolved_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or(ServerConfig {
            url: None,
            timeout: default_timeout(),
            connection_timeout: default_connection_timeout(),
            http_version: default_http_version(),
        })
    }

    /// Configured node URL(s), falling back to the local default
    pub fn server_url(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// HTTP version setting; unknown values fall back to `Auto`
    pub fn http_version(&self) -> HttpVersion {
        self.server
            .as_ref()
            .map(|s| s.http_version.parse().unwrap_or(HttpVersion::Auto))
            .unwrap_or_default()
    }

    /// Output format from the `[ui]` section; unknown values mean table
    pub fn output_format(&self) -> OutputFormat {
        match self.ui.as_ref().map(|ui| ui.format.to_lowercase()) {
            Some(format) if format == "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }

    /// Timeouts from the `[server]` section. `request_timeout_secs` overrides
    /// the configured request timeout when given.
    pub fn to_timeouts(&self, request_timeout_secs: Option<u64>) -> CrateLinkTimeouts {
        let server = self.resolved_server();
        CrateLinkTimeouts::builder()
            .connection_timeout_secs(server.connection_timeout)
            .receive_timeout_secs(request_timeout_secs.unwrap_or(server.timeout))
            .build()
    }
}
