// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tracing::Instrument;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::conversion::{Trigger, TriggerKind};
use crate::engine::adapters::{label, unsupported};
use crate::engine::{ConversionRunner, SubscriptionHandle};
use crate::errors::ConfigError;
use crate::observability::messages::source::{SubscriptionActivated, SubscriptionEnded};
use crate::observability::messages::StructuredLog;
use crate::traits::SourceAdapter;

/// Invokes a timer conversion every interval, first one interval after activation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerAdapter;

impl TimerAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for TimerAdapter {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Timer
    }

    fn activate(&self, runner: ConversionRunner) -> Result<Vec<SubscriptionHandle>, ConfigError> {
        let Trigger::Timer { interval, callback } = runner.conversion().trigger().clone() else {
            return Err(unsupported(&runner));
        };

        let handle = SubscriptionHandle::new(label(&runner));
        let token = handle.token();
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let activated = SubscriptionActivated {
            conversion: runner.conversion().title(),
            trigger: "timer",
            inputs: 0,
        };
        activated.log();
        let span = activated.span("subscription");

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        runner.invoke(|| callback(runner.context()));
                    }
                }
            }
            SubscriptionEnded {
                conversion: runner.conversion().title(),
                trigger: "timer",
                reason: "cancelled",
            }
            .log();
        }
        .instrument(span));

        Ok(vec![handle])
    }
}
