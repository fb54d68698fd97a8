// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for source adapter subscriptions.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A source adapter began listening for a conversion.
///
/// # Log Level
/// `debug!`
pub struct SubscriptionActivated<'a> {
    pub conversion: &'a str,
    pub trigger: &'a str,
    pub inputs: usize,
}

impl Display for SubscriptionActivated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Subscribed '{}' via {} adapter ({} inputs)",
            self.conversion, self.trigger, self.inputs
        )
    }
}

impl StructuredLog for SubscriptionActivated<'_> {
    fn log(&self) {
        tracing::debug!(
            conversion = self.conversion,
            trigger = self.trigger,
            inputs = self.inputs,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "subscription",
            span_name = name,
            conversion = self.conversion,
            trigger = self.trigger,
        )
    }
}

/// A subscription task finished, either cancelled or because its source closed.
///
/// # Log Level
/// `debug!`
pub struct SubscriptionEnded<'a> {
    pub conversion: &'a str,
    pub trigger: &'a str,
    pub reason: &'a str,
}

impl Display for SubscriptionEnded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Subscription for '{}' ({}) ended: {}",
            self.conversion, self.trigger, self.reason
        )
    }
}

impl StructuredLog for SubscriptionEnded<'_> {
    fn log(&self) {
        tracing::debug!(
            conversion = self.conversion,
            trigger = self.trigger,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "subscription_ended",
            span_name = name,
            conversion = self.conversion,
            reason = self.reason,
        )
    }
}

/// A raw event subscriber fell behind and missed deltas.
///
/// # Log Level
/// `warn!` - Data was lost for this subscriber
pub struct RawEventsLagged {
    pub skipped: u64,
}

impl Display for RawEventsLagged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Raw event subscriber lagged, {} deltas skipped", self.skipped)
    }
}

impl StructuredLog for RawEventsLagged {
    fn log(&self) {
        tracing::warn!(skipped = self.skipped, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("raw_events_lagged", span_name = name, skipped = self.skipped)
    }
}
