// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use go_cloud::prelude::*;
//! ```

pub use crate::api::{AppState, create_router, handlers::RootResponse};
pub use crate::config::Config;
pub use crate::error::{AppError, Result};
pub use crate::server::{DrainOutcome, ShutdownController, ShutdownSignal, shutdown_channel};
