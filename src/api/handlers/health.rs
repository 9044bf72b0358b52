// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use crate::api::AppState;

/// GET /healthz
///
/// Liveness probe. Always answers `ok` while the process is serving,
/// regardless of configuration.
pub async fn healthz() -> &'static str {
    "ok"
}

/// GET /readyz
///
/// Readiness probe gated on the `APP_READY` flag read at startup.
pub async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.config.ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}
