/*!
 * File Service - Main Entry Point
 *
 * Serves sandboxed file operations over JSON-RPC:
 * - Configuration from FILESERVICE_* environment variables
 * - Sandbox root created on startup
 * - Graceful shutdown on Ctrl+C / SIGTERM
 */

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use file_service::api::{serve, shutdown_signal};
use file_service::{init_tracing, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.trace_json);

    info!("File service starting...");
    info!(
        root = %config.root.display(),
        bind_addr = %config.bind_addr,
        cross_device = %config.cross_device,
        "Configuration loaded"
    );

    let engine = config
        .build_engine()
        .with_context(|| format!("Failed to prepare sandbox root {}", config.root.display()))?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    serve(listener, engine, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("File service shut down");
    Ok(())
}
