// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log lines are message structs in
//! [`messages`], each implementing `Display` for the human-readable text and
//! [`messages::StructuredLog`] for the leveled event with structured fields.
//! Errors never surface to the outbound channel; this module is where they go.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - lifecycle, enablement and skipped conversions
//! * `messages::dispatch` - transform failures, encoding failures, emitted lines
//! * `messages::source` - subscription activation and teardown, lagging feeds
//!
//! # Usage
//!
//! ```rust
//! use sk_to_n2k::observability::messages::{engine::ConversionEnabled, StructuredLog};
//!
//! ConversionEnabled {
//!     title: "Engine Parameters (127489,127488)",
//!     option_key: "ENGINE_PARAMETERS",
//!     trigger: "value-change",
//! }
//! .log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is
/// harmless: the second install is ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::consts::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
