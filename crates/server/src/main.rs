// crates/server/src/main.rs
//! docflow server binary.
//!
//! Binds immediately and serves until ctrl-c. Shutdown cancels the runner's
//! token, so in-flight jobs terminate as `failed` with an interruption log
//! instead of hanging in `processing`.

use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use docflow_server::{create_app, AppState};

/// Default port for the server.
const DEFAULT_PORT: u16 = 8080;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("DOCFLOW_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docflow_server=info,docflow_core=info,tower_http=info")),
        )
        .init();

    let state = AppState::new();
    let shutdown = state.runner.shutdown_token();
    let app = create_app(state);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    eprintln!("\n  docflow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("  \u{2192} http://localhost:{port}\n");

    // Ctrl-c cancels the worker token before the server drains.
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested, cancelling workers");
                shutdown.cancel();
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}
