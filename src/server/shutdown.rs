// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Shutdown signalling
//!
//! A `watch` channel carries the shutdown request from the OS signal
//! listener (or a test) into the accept loop.

use tokio::sync::watch;

/// Receiving half, cloned into every component that must stop
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolves once shutdown has been requested
    pub async fn wait(mut self) {
        while !*self.receiver.borrow_and_update() {
            if self.receiver.changed().await.is_err() {
                // Controller dropped
                break;
            }
        }
    }

    #[cfg(test)]
    fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Sending half
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
    }

    /// Triggers shutdown once SIGINT or SIGTERM arrives
    pub async fn shutdown_on_signal(self) {
        let name = wait_for_signal().await;
        tracing::info!("Shutdown signal received ({})", name);
        self.shutdown();
    }
}

/// Creates a connected (controller, signal) pair
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Waits for SIGTERM or SIGINT and returns the signal name
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to register SIGTERM handler: {}", e);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        name = wait_for_ctrl_c() => name,
    }
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "SIGINT",
        Err(e) => {
            // No way to observe the signal: never trigger shutdown from here.
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending().await
        }
    }
}
