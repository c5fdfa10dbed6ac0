//! HTTP surface for the to-do service.
//!
//! # Overview
//! An axum router over five routes on `/` and `/{id}`, backed by the SQLite
//! storage from `todo-core`. Bodies and responses are JSON; every response
//! uses the `{message, data|toDo}` envelope.
//!
//! # Design
//! - The router state is a shared `Storage`; the storage owns its own lock.
//! - Storage calls run under `spawn_blocking` so SQLite I/O never stalls the
//!   async workers.
//! - CORS is permissive and every request gets a tracing span.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use todo_core::Storage;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

pub use config::{Config, ConfigError};
pub use error::{ApiError, Operation, StartupError};

pub type Db = Arc<Storage>;

/// Build the router. `storage` must already be initialized.
pub fn app(storage: Db) -> Router {
    Router::new()
        .route("/", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/{id}",
            get(handlers::get_todo)
                .delete(handlers::delete_todo)
                .patch(handlers::update_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(storage)
}

/// Open and initialize storage, bind, then serve until Ctrl-C.
///
/// Storage comes up before the listener binds, so a database failure
/// returns without ever accepting a connection.
pub async fn start(config: Config) -> Result<(), StartupError> {
    let storage = Storage::open(&config.db_path)?;
    storage.initialize()?;
    tracing::info!(db_path = %config.db_path.display(), "database ready");

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Server running on port {}", config.port);
    run(listener, Arc::new(storage)).await?;
    Ok(())
}

/// Serve until Ctrl-C.
pub async fn run(listener: TcpListener, storage: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(storage))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
