// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Lifecycle errors returned by [`crate::engine::Engine::start`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `start` was called while the engine is running.
    #[error("Engine is already running; call stop() first")]
    AlreadyRunning,

    /// `start` was called outside a Tokio runtime.
    #[error("Engine must be started from within a Tokio runtime")]
    NoRuntime,
}
