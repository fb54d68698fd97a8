// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for consistent human-readable output
//! and [`StructuredLog`] to emit it at its intended level with the message's
//! fields attached.
//!
//! # Usage Pattern
//!
//! ```rust
//! use sk_to_n2k::observability::messages::{engine::EngineStopped, StructuredLog};
//!
//! let msg = EngineStopped { cancelled: 3 };
//! msg.log();
//! tracing::info!("{}", msg);
//! ```

use std::fmt::Display;
use tracing::Span;

pub mod dispatch;
pub mod engine;
pub mod source;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog: Display {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
