// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # go-cloud
//!
//! Minimal HTTP service exposing liveness, readiness and identity
//! endpoints, with request logging and bounded graceful shutdown.
//!
//! ## Main modules
//! - `api`: routes, handlers and request logging
//! - `config`: configuration loaded from the environment
//! - `error`: error types
//! - `server`: accept loop, signal handling and connection draining
//! - `prelude`: commonly used types

mod api;
mod config;
mod error;
mod server;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, parse_ready};

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router, state and handlers
pub use api::{AppState, create_router, handlers::RootResponse, log_requests};

/// Server lifecycle
pub use server::{
    DrainOutcome, ShutdownController, ShutdownSignal, bind, run, serve, shutdown_channel,
    wait_for_signal,
};
