// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::StreamExt;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

use crate::conversion::{Trigger, TriggerKind};
use crate::engine::adapters::{label, unsupported};
use crate::engine::{ConversionRunner, SubscriptionHandle};
use crate::errors::ConfigError;
use crate::observability::messages::source::{SubscriptionActivated, SubscriptionEnded};
use crate::observability::messages::StructuredLog;
use crate::traits::{RawEventFeed, SourceAdapter};

/// Invokes a raw-event conversion once per delta from the feed.
///
/// The feed is subscribed during activation, so no delta published after
/// `activate` returns is missed.
#[derive(Clone)]
pub struct RawEventAdapter {
    feed: Arc<dyn RawEventFeed>,
}

impl RawEventAdapter {
    pub fn new(feed: Arc<dyn RawEventFeed>) -> Self {
        Self { feed }
    }
}

impl fmt::Debug for RawEventAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEventAdapter").finish_non_exhaustive()
    }
}

impl SourceAdapter for RawEventAdapter {
    fn kind(&self) -> TriggerKind {
        TriggerKind::RawEvent
    }

    fn activate(&self, runner: ConversionRunner) -> Result<Vec<SubscriptionHandle>, ConfigError> {
        let Trigger::RawEvent { callback } = runner.conversion().trigger().clone() else {
            return Err(unsupported(&runner));
        };

        let handle = SubscriptionHandle::new(label(&runner));
        let token = handle.token();
        let mut deltas = self.feed.subscribe();

        let activated = SubscriptionActivated {
            conversion: runner.conversion().title(),
            trigger: "raw-event",
            inputs: 0,
        };
        activated.log();
        let span = activated.span("subscription");

        tokio::spawn(async move {
            let reason = loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break "cancelled",
                    next = deltas.next() => match next {
                        Some(delta) => {
                            runner.invoke(|| callback(&delta, runner.context()));
                        }
                        None => break "feed closed",
                    },
                }
            };
            SubscriptionEnded {
                conversion: runner.conversion().title(),
                trigger: "raw-event",
                reason,
            }
            .log();
        }
        .instrument(span));

        Ok(vec![handle])
    }
}
