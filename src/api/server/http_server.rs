/*!
 * HTTP Server
 * axum router exposing POST /filesystem and GET /health
 */

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::handlers::dispatch::METHODS;
use crate::api::handlers::RpcDispatcher;
use crate::engine::FileEngine;

#[derive(Clone)]
struct AppState {
    dispatcher: RpcDispatcher,
    start_time: Instant,
}

/// Build the service router
pub fn router(engine: FileEngine) -> Router {
    let state = AppState {
        dispatcher: RpcDispatcher::new(engine),
        start_time: Instant::now(),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/filesystem", post(rpc_handler))
        .with_state(Arc::new(state))
}

/// Serve until `shutdown` resolves, then drain in-flight requests
pub async fn serve<F>(listener: TcpListener, engine: FileEngine, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, root = %engine.root().as_path().display(), "file service listening");

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("file service stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "methods": METHODS,
    }))
}

/// A body made only of notifications gets an empty 204
async fn rpc_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.dispatcher.handle_body(&body).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
