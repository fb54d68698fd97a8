// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for engine lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Engine start and stop
//! * Conversion enablement resolution
//! * Conversions skipped because of configuration errors

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Engine start requested.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EngineStarting {
    pub registered: usize,
    pub configured: usize,
}

impl Display for EngineStarting {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting conversion engine: {} registered conversions, {} option keys configured",
            self.registered, self.configured
        )
    }
}

impl StructuredLog for EngineStarting {
    fn log(&self) {
        tracing::info!(
            registered = self.registered,
            configured = self.configured,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_start",
            span_name = name,
            registered = self.registered,
            configured = self.configured,
        )
    }
}

/// Engine running.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use sk_to_n2k::observability::messages::engine::EngineStarted;
///
/// let msg = EngineStarted {
///     started: 3,
///     skipped: 1,
///     subscriptions: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EngineStarted {
    pub started: usize,
    pub skipped: usize,
    pub subscriptions: usize,
}

impl Display for EngineStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Conversion engine started: {} conversions running, {} skipped, {} subscriptions",
            self.started, self.skipped, self.subscriptions
        )
    }
}

impl StructuredLog for EngineStarted {
    fn log(&self) {
        tracing::info!(
            started = self.started,
            skipped = self.skipped,
            subscriptions = self.subscriptions,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_started",
            span_name = name,
            started = self.started,
            skipped = self.skipped,
            subscriptions = self.subscriptions,
        )
    }
}

/// Engine stopped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EngineStopped {
    pub cancelled: usize,
}

impl Display for EngineStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Conversion engine stopped: {} subscriptions cancelled", self.cancelled)
    }
}

impl StructuredLog for EngineStopped {
    fn log(&self) {
        tracing::info!(cancelled = self.cancelled, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("engine_stopped", span_name = name, cancelled = self.cancelled)
    }
}

/// A conversion resolved as enabled and is being activated.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use sk_to_n2k::observability::messages::engine::ConversionEnabled;
///
/// let msg = ConversionEnabled {
///     title: "Temperature, exhaust (130312)",
///     option_key: "EXHAUST_TEMPERATURE",
///     trigger: "value-change",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Temperature, exhaust (130312) is enabled (EXHAUST_TEMPERATURE, value-change)"
/// );
/// ```
pub struct ConversionEnabled<'a> {
    pub title: &'a str,
    pub option_key: &'a str,
    pub trigger: &'a str,
}

impl Display for ConversionEnabled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} is enabled ({}, {})",
            self.title, self.option_key, self.trigger
        )
    }
}

impl StructuredLog for ConversionEnabled<'_> {
    fn log(&self) {
        tracing::info!(
            title = self.title,
            option_key = self.option_key,
            trigger = self.trigger,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "conversion",
            span_name = name,
            title = self.title,
            option_key = self.option_key,
            trigger = self.trigger,
        )
    }
}

/// A registered option key is absent from the options or disabled.
///
/// # Log Level
/// `debug!` - Routine, expected for most of the catalog
pub struct ConversionDisabled<'a> {
    pub option_key: &'a str,
}

impl Display for ConversionDisabled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Conversion '{}' is not enabled", self.option_key)
    }
}

impl StructuredLog for ConversionDisabled<'_> {
    fn log(&self) {
        tracing::debug!(option_key = self.option_key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("conversion_disabled", span_name = name, option_key = self.option_key)
    }
}

/// A conversion could not be activated and was skipped.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use sk_to_n2k::observability::messages::engine::ConversionSkipped;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "no adapter");
/// let msg = ConversionSkipped {
///     title: "X",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConversionSkipped<'a> {
    pub title: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ConversionSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping conversion '{}': {}", self.title, self.error)
    }
}

impl StructuredLog for ConversionSkipped<'_> {
    fn log(&self) {
        tracing::error!(
            title = self.title,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "conversion_skipped",
            span_name = name,
            title = self.title,
            error = %self.error,
        )
    }
}

/// An option key in the configuration matches no registered conversion.
///
/// # Log Level
/// `warn!` - Likely a typo that leaves a conversion disabled
pub struct OptionKeyIgnored<'a> {
    pub option_key: &'a str,
}

impl Display for OptionKeyIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring option key '{}': no registered conversion uses it",
            self.option_key
        )
    }
}

impl StructuredLog for OptionKeyIgnored<'_> {
    fn log(&self) {
        tracing::warn!(option_key = self.option_key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("option_key_ignored", span_name = name, option_key = self.option_key)
    }
}
