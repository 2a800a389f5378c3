//! Server startup logic for the threaded and development modes.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};

use crate::config::{ServerConfig, ServerMode, LISTEN_ADDR};
use crate::environment::InstanceIdentity;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Build the Tokio runtime for the configured mode.
///
/// Threaded mode gets a multi-threaded runtime with exactly
/// `worker_threads` workers; development mode runs on the current thread.
pub fn build_runtime(config: &ServerConfig) -> std::io::Result<Runtime> {
    match config.mode {
        ServerMode::Threaded => Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name("http-worker")
            .enable_all()
            .build(),
        ServerMode::Development => Builder::new_current_thread().enable_all().build(),
    }
}

/// Start the server on the fixed listen address.
///
/// This function blocks until the server shuts down.
pub async fn start_server(
    app: Router,
    config: &ServerConfig,
    identity: &InstanceIdentity,
) -> Result<(), ServerError> {
    match config.mode {
        ServerMode::Threaded => {
            tracing::info!(
                instance_id = %identity.instance_id,
                region = %identity.region,
                workers = config.worker_threads,
                "Starting application with threaded server"
            );
            serve_threaded(app, LISTEN_ADDR, Handle::new()).await
        }
        ServerMode::Development => {
            tracing::warn!("Using development listener (not recommended for production)");
            let listener = TcpListener::bind(LISTEN_ADDR).await?;
            serve_development(app, listener).await
        }
    }
}

/// Serve through `axum-server`, draining connections on shutdown.
///
/// `handle` reports the bound address once listening, which lets callers bind
/// port 0.
pub async fn serve_threaded(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    // Setup graceful shutdown
    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Serve on an already-bound listener with `axum::serve`.
pub async fn serve_development(app: Router, listener: TcpListener) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Starting development HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::RuntimeFlavor;

    #[test]
    fn test_threaded_runtime_flavor() {
        let config = ServerConfig {
            mode: ServerMode::Threaded,
            worker_threads: 4,
        };
        let runtime = build_runtime(&config).unwrap();
        let flavor =
            runtime.block_on(async { tokio::runtime::Handle::current().runtime_flavor() });
        assert_eq!(flavor, RuntimeFlavor::MultiThread);
        assert_eq!(runtime.metrics().num_workers(), 4);
    }

    #[test]
    fn test_development_runtime_flavor() {
        let config = ServerConfig {
            mode: ServerMode::Development,
            worker_threads: 4,
        };
        let runtime = build_runtime(&config).unwrap();
        let flavor =
            runtime.block_on(async { tokio::runtime::Handle::current().runtime_flavor() });
        assert_eq!(flavor, RuntimeFlavor::CurrentThread);
    }

    #[tokio::test]
    async fn test_threaded_bind_conflict_is_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let result = serve_threaded(Router::new(), addr, Handle::new()).await;
        assert!(matches!(result, Err(ServerError::Server(_))));
    }
}
