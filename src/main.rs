//! Servicedesk: HTTP/JSON backend for college service-support tickets.
//!
//! # Usage
//!
//! ```bash
//! servicedesk --port 5000 --db-path ./tickets.db --log-level info
//! ```
//!
//! Environment variables can also be used:
//! - `SERVICEDESK_PORT`: Port to listen on
//! - `SERVICEDESK_DB_PATH`: SQLite database file
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use servicedesk::config::Config;
use servicedesk::observability::metrics::init_metrics_with_endpoint;
use servicedesk::observability::tracing::init_tracing;
use servicedesk::server::run_server;
use tokio::sync::watch;

/// Print startup banner with version and configuration.
fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        r#"
  Servicedesk v{} - College Service Support API

  Configuration:
    Address:    {}:{}
    Database:   {}
    Log Level:  {}

  Press Ctrl+C to shutdown gracefully.
"#,
        version,
        config.host,
        config.port,
        config.db_path.display(),
        config.log_level
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse_args();

    init_tracing(&config.log_level);
    init_metrics_with_endpoint(config.otel_endpoint.as_deref());

    print_banner(&config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        // Wait for SIGTERM or SIGINT (Ctrl+C)
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating shutdown...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.expect("failed to listen for ctrl+c");
            tracing::info!("Received Ctrl+C, initiating shutdown...");
        }

        let _ = shutdown_tx.send(true);
    });

    run_server(config, shutdown_rx).await?;

    tracing::info!("Servicedesk shutdown complete");
    Ok(())
}
