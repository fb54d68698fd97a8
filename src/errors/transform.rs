// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure raised by a conversion's transform callback.
///
/// The invocation's output is treated as absent; the source adapter stays
/// subscribed for future invocations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The callback rejected its inputs.
    #[error("Transform failed: {0}")]
    Failed(String),

    /// A positional callback received the wrong number of values.
    #[error("Transform expected {expected} inputs but received {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The callback panicked; the payload message is captured.
    #[error("Transform panicked: {0}")]
    Panicked(String),
}

impl TransformError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
