// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the go-cloud service
//!
//! Loads configuration once at startup from environment variables
//! (and an optional `.env` file). The resulting [`Config`] is immutable
//! and shared with every request handler.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const SHUTDOWN_GRACE_SECS: u64 = 5;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const APP_READY: &str = "APP_READY";
    pub const SHUTDOWN_GRACE_SECONDS: &str = "SHUTDOWN_GRACE_SECONDS";
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Whether `/readyz` reports the service as ready
    pub ready: bool,
    /// Upper bound on the drain after a shutdown signal
    pub shutdown_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: defaults::PORT,
            ready: false,
            shutdown_grace: Duration::from_secs(defaults::SHUTDOWN_GRACE_SECS),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// `.env` is loaded by `main` before this runs.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(env_vars::PORT).filter(|v| !v.is_empty()) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::Config(format!("invalid {} '{}': {}", env_vars::PORT, raw, e))
            })?,
            None => defaults::PORT,
        };

        let ready = parse_ready(lookup(env_vars::APP_READY).as_deref());

        let grace_secs = match lookup(env_vars::SHUTDOWN_GRACE_SECONDS) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to parse {}='{}': {}. Using {}s.",
                    env_vars::SHUTDOWN_GRACE_SECONDS,
                    raw,
                    e,
                    defaults::SHUTDOWN_GRACE_SECS
                );
                defaults::SHUTDOWN_GRACE_SECS
            }),
            None => defaults::SHUTDOWN_GRACE_SECS,
        };

        Ok(Config {
            port,
            ready,
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }

    /// Address the HTTP listener binds to (all interfaces)
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Readiness flag: only `true` counts, compared case-insensitively
pub fn parse_ready(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
