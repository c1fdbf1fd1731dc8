//! Main entry point for the portfolio contact backend.
//!
//! This file loads configuration, initializes tracing, opens the storage
//! backend, and serves the Axum router until Ctrl-C or SIGTERM.

use anyhow::Context;
use folio_backend::config::Config;
use folio_backend::{build_router, database, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,folio_backend=debug,folio_adapters=debug")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    // Without storage there is nothing useful to serve.
    let store = database::connect(&config.storage)
        .await
        .context("failed to connect to storage")?;

    let app = build_router(AppState::from_config(store, &config));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let term = async {
        if let Ok(mut s) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
            s.recv().await;
        }
    };
    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = term => {} }
    tracing::info!("shutdown signal received");
}
