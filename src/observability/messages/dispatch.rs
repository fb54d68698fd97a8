// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for transform invocation and descriptor dispatch.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A trigger fired and the transform is about to run.
///
/// # Log Level
/// `trace!` - One per trigger firing
///
/// The span built from this message wraps the transform and the dispatch of
/// its batch, so every event logged meanwhile carries the conversion title.
pub struct TransformInvoked<'a> {
    pub conversion: &'a str,
    pub trigger: &'a str,
}

impl Display for TransformInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invoking conversion '{}' ({})", self.conversion, self.trigger)
    }
}

impl StructuredLog for TransformInvoked<'_> {
    fn log(&self) {
        tracing::trace!(conversion = self.conversion, trigger = self.trigger, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "transform",
            span_name = name,
            conversion = self.conversion,
            trigger = self.trigger,
        )
    }
}

/// A transform callback returned an error or panicked.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use sk_to_n2k::errors::TransformError;
/// use sk_to_n2k::observability::messages::dispatch::TransformFailed;
///
/// let error = TransformError::failed("oil pressure is not a number");
/// let msg = TransformFailed {
///     conversion: "Engine Parameters (127489,127488)",
///     trigger: "value-change",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TransformFailed<'a> {
    pub conversion: &'a str,
    pub trigger: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TransformFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Conversion '{}' ({}) transform failed: {}",
            self.conversion, self.trigger, self.error
        )
    }
}

impl StructuredLog for TransformFailed<'_> {
    fn log(&self) {
        tracing::error!(
            conversion = self.conversion,
            trigger = self.trigger,
            error = %self.error,
            error_debug = ?self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "transform_failed",
            span_name = name,
            conversion = self.conversion,
            trigger = self.trigger,
            error = %self.error,
        )
    }
}

/// One descriptor could not be encoded; the rest of the batch continues.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use sk_to_n2k::errors::EncodingError;
/// use sk_to_n2k::observability::messages::dispatch::DescriptorEncodingFailed;
///
/// let error = EncodingError::UnknownPgn(65280);
/// let msg = DescriptorEncodingFailed {
///     conversion: "Custom",
///     descriptor: r#"{"pgn":65280,"body":{"fields":{}}}"#,
///     error: &error,
/// };
///
/// assert!(msg.to_string().starts_with("error writing pgn"));
/// ```
pub struct DescriptorEncodingFailed<'a> {
    pub conversion: &'a str,
    pub descriptor: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DescriptorEncodingFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "error writing pgn {} for conversion '{}': {}",
            self.descriptor, self.conversion, self.error
        )
    }
}

impl StructuredLog for DescriptorEncodingFailed<'_> {
    fn log(&self) {
        tracing::error!(
            conversion = self.conversion,
            descriptor = self.descriptor,
            error = %self.error,
            error_debug = ?self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "descriptor_encoding_failed",
            span_name = name,
            conversion = self.conversion,
            descriptor = self.descriptor,
            error = %self.error,
        )
    }
}

/// A wire line was emitted.
///
/// # Log Level
/// `debug!` - One per outbound message
pub struct LineEmitted<'a> {
    pub conversion: &'a str,
    pub pgn: u32,
    pub line: &'a str,
}

impl Display for LineEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "emit {}", self.line)
    }
}

impl StructuredLog for LineEmitted<'_> {
    fn log(&self) {
        tracing::debug!(
            conversion = self.conversion,
            pgn = self.pgn,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "line_emitted",
            span_name = name,
            conversion = self.conversion,
            pgn = self.pgn,
        )
    }
}

/// Nobody is listening on the outbound channel.
///
/// # Log Level
/// `trace!` - Normal before a transport attaches
pub struct LineDropped<'a> {
    pub channel: &'a str,
    pub pgn: u32,
}

impl Display for LineDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No subscribers on '{}', PGN {} line dropped", self.channel, self.pgn)
    }
}

impl StructuredLog for LineDropped<'_> {
    fn log(&self) {
        tracing::trace!(channel = self.channel, pgn = self.pgn, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("line_dropped", span_name = name, channel = self.channel, pgn = self.pgn)
    }
}

/// A wire sink fell behind the outbound channel and missed lines.
///
/// # Log Level
/// `warn!` - Data was lost for this sink
pub struct WireLinesLagged {
    pub skipped: u64,
}

impl Display for WireLinesLagged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wire sink lagged, {} lines skipped", self.skipped)
    }
}

impl StructuredLog for WireLinesLagged {
    fn log(&self) {
        tracing::warn!(skipped = self.skipped, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("wire_lines_lagged", span_name = name, skipped = self.skipped)
    }
}
