//! Configuration parsing for the servicedesk server.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Defaults matching a local development setup

use clap::Parser;
use std::path::PathBuf;

/// Servicedesk: HTTP/JSON backend for college service-support tickets.
#[derive(Parser, Debug, Clone)]
#[command(name = "servicedesk")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "SERVICEDESK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVICEDESK_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(short, long, env = "SERVICEDESK_DB_PATH", default_value = "./tickets.db")]
    pub db_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Do not create missing tables at startup (store is provisioned externally)
    #[arg(long, env = "SERVICEDESK_SKIP_SCHEMA_INIT")]
    pub skip_schema_init: bool,

    /// OpenTelemetry collector endpoint for metrics export (optional)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otel_endpoint: Option<String>,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Socket address string the server binds to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create a configuration for testing against the given database file.
    pub fn test_config(db_path: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0, // Random port
            db_path,
            log_level: "debug".into(),
            skip_schema_init: false,
            otel_endpoint: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            db_path: PathBuf::from("./tickets.db"),
            log_level: "info".into(),
            skip_schema_init: false,
            otel_endpoint: None,
        }
    }
}
