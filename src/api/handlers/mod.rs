// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod root;

pub use health::{healthz, readyz};
pub use root::{RootResponse, fallback, method_not_allowed, root};
