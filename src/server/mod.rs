// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP server lifecycle
//!
//! Starting → Serving → ShuttingDown → Stopped. After the shutdown
//! future resolves the listener is closed, open connections are asked to
//! finish, and whatever is still running when the grace period expires
//! is aborted.

mod shutdown;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::api::{AppState, create_router};
use crate::config::Config;
use crate::error::Result;

pub use shutdown::{ShutdownController, ShutdownSignal, shutdown_channel, wait_for_signal};

/// How the drain phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every connection finished within the grace period
    Graceful,
    /// Grace period expired; remaining connections were closed
    Forced { abandoned: usize },
}

/// Binds the listener for `addr`
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address {}: {}", addr, e);
        e
    })?;
    Ok(listener)
}

/// Runs the service until SIGINT/SIGTERM, then drains
pub async fn run(config: Config) -> Result<DrainOutcome> {
    let listener = bind(config.listen_addr()).await?;
    let grace = config.shutdown_grace;
    let app = create_router(Arc::new(AppState::new(config)));

    let (controller, signal) = shutdown_channel();
    tokio::spawn(controller.shutdown_on_signal());

    Ok(serve(listener, app, signal.wait(), grace).await)
}

/// Accepts connections on `listener` until `shutdown` resolves, then
/// waits up to `grace` for in-flight requests before closing the rest.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> DrainOutcome
where
    F: Future<Output = ()>,
{
    match listener.local_addr() {
        Ok(addr) => tracing::info!("starting on {}", addr),
        Err(e) => tracing::warn!("Listener has no local address: {}", e),
    }

    let builder = Builder::new(TokioExecutor::new());
    let graceful = GracefulShutdown::new();
    let mut connections = JoinSet::new();
    let mut shutdown = std::pin::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        tokio::select! {
                            _ = tokio::time::sleep(Duration::from_millis(50)) => continue,
                            () = &mut shutdown => break,
                        }
                    }
                };
                let service = TowerToHyperService::new(app.clone());
                let conn = builder
                    .serve_connection_with_upgrades(TokioIo::new(stream), service)
                    .into_owned();
                let conn = graceful.watch(conn);
                connections.spawn(async move {
                    if let Err(e) = conn.await {
                        tracing::debug!("Connection from {} closed with error: {}", peer, e);
                    }
                });
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            () = &mut shutdown => break,
        }
    }

    // Stop accepting before draining.
    drop(listener);
    while connections.try_join_next().is_some() {}
    tracing::info!(
        "shutting down, draining {} connection(s) for up to {:?}",
        connections.len(),
        grace
    );

    let outcome = match tokio::time::timeout(grace, graceful.shutdown()).await {
        Ok(()) => {
            while connections.join_next().await.is_some() {}
            DrainOutcome::Graceful
        }
        Err(_) => {
            while connections.try_join_next().is_some() {}
            let abandoned = connections.len();
            tracing::warn!(
                "graceful shutdown timed out after {:?}, closing {} connection(s)",
                grace,
                abandoned
            );
            connections.shutdown().await;
            DrainOutcome::Forced { abandoned }
        }
    };

    tracing::info!("server stopped");
    outcome
}
