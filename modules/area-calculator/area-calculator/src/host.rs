//! Process host: TCP serve loop and signal-driven shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use crate::api::grpc::calculator_server;
use crate::config::AppConfig;
use crate::domain::Service;

/// Serve the calculator on an already bound `listener` until `cancel` fires.
///
/// # Errors
/// Returns an error if the tonic server fails.
pub async fn serve(
    listener: TcpListener,
    service: Arc<Service>,
    cancel: CancellationToken,
) -> Result<()> {
    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(calculator_server(service))
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await
        .context("gRPC server failed")?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
///
/// # Errors
/// Returns an error if the address is invalid, binding fails, or the server fails.
pub async fn run(config: &AppConfig) -> Result<()> {
    let addr = config.listen_socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, transport = "tcp", "area calculator listening");

    let cancel = CancellationToken::new();
    let cancel_for_signals = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!(
                error = %e,
                "shutdown: signal waiter failed, falling back to ctrl_c()"
            );
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "shutdown: ctrl_c() fallback failed");
            }
        }
        cancel_for_signals.cancel();
    });

    serve(listener, Arc::new(Service::new()), cancel).await
}

/// Wait for termination signals (Ctrl+C, SIGTERM).
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = wait_ctrl_c() => result?,
        result = wait_sigterm() => result?,
    }

    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

async fn wait_ctrl_c() -> Result<()> {
    signal::ctrl_c().await.context("failed to listen for Ctrl+C")?;
    tracing::info!("Received Ctrl+C signal");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<()> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?;
    handler.recv().await;
    tracing::info!("Received SIGTERM signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<()> {
    std::future::pending::<Result<()>>().await
}
