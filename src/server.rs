//! HTTP server setup and lifecycle.
//!
//! Configures the axum router with:
//! - User and ticket route handlers
//! - Permissive CORS for browser frontends
//! - Request tracing
//! - Graceful shutdown support

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::service::{self, tickets, users};
use crate::storage::schema::initialize_schema;
use crate::storage::Store;

/// Server state shared across handlers.
///
/// Holds no data of its own; every request goes to the store.
pub struct ServerState {
    pub store: Store,
}

impl ServerState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(service::home))
        .route("/register", post(users::register))
        .route("/user/login", post(users::login))
        .route("/ticket/create", post(tickets::create_ticket))
        .route("/ticket/all", get(tickets::all_tickets))
        .route("/ticket/status/:ticket_id", put(tickets::update_ticket_status))
        .fallback(service::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Open the configured store, creating missing tables unless disabled.
pub fn prepare_store(config: &Config) -> anyhow::Result<Store> {
    let store = Store::new(&config.db_path);

    if config.skip_schema_init {
        tracing::info!(path = %store.path().display(), "Skipping schema initialization");
    } else {
        let conn = store
            .open()
            .with_context(|| format!("failed to open database {}", store.path().display()))?;
        initialize_schema(&conn).context("failed to initialize schema")?;
    }

    Ok(store)
}

/// Run the servicedesk HTTP server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `shutdown_rx` - Receiver for shutdown signal
///
/// # Returns
///
/// Returns when the server has shut down.
pub async fn run_server(config: Config, mut shutdown_rx: watch::Receiver<bool>) -> anyhow::Result<()> {
    let store = prepare_store(&config)?;
    let app = build_router(Arc::new(ServerState::new(store)));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(address = %listener.local_addr()?, "Starting servicedesk HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // Wait for shutdown signal
            let _ = shutdown_rx.changed().await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
