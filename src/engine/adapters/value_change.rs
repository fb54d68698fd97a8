// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::consts::DEBOUNCE_WINDOW;
use crate::conversion::{Trigger, TriggerKind, ValueChangeFn};
use crate::engine::adapters::{label, unsupported};
use crate::engine::combine::Combiner;
use crate::engine::debounce::Debouncer;
use crate::engine::{ConversionRunner, SubscriptionHandle};
use crate::errors::ConfigError;
use crate::observability::messages::source::{SubscriptionActivated, SubscriptionEnded};
use crate::observability::messages::StructuredLog;
use crate::traits::{SourceAdapter, ValueSource};

type SlotStream = BoxStream<'static, (usize, Option<Value>)>;

/// Combines the latest value of each bound path and invokes the transform
/// through a leading-edge debouncer.
#[derive(Clone)]
pub struct ValueChangeAdapter {
    source: Arc<dyn ValueSource>,
}

impl ValueChangeAdapter {
    pub fn new(source: Arc<dyn ValueSource>) -> Self {
        Self { source }
    }
}

impl fmt::Debug for ValueChangeAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueChangeAdapter")
            .field("window", &DEBOUNCE_WINDOW)
            .finish_non_exhaustive()
    }
}

impl SourceAdapter for ValueChangeAdapter {
    fn kind(&self) -> TriggerKind {
        TriggerKind::ValueChange
    }

    fn activate(&self, runner: ConversionRunner) -> Result<Vec<SubscriptionHandle>, ConfigError> {
        let Trigger::ValueChange { inputs, callback, .. } = runner.conversion().trigger().clone() else {
            return Err(unsupported(&runner));
        };

        let arity = inputs.len();
        let merged: SlotStream = stream::select_all(inputs.iter().map(|binding| {
            let slot = binding.slot;
            self.source
                .latest_stream(&binding.path, binding.staleness)
                .map(move |value| (slot, value))
                .boxed()
        }))
        .boxed();

        let handle = SubscriptionHandle::new(label(&runner));
        let activated = SubscriptionActivated {
            conversion: runner.conversion().title(),
            trigger: "value-change",
            inputs: arity,
        };
        activated.log();
        let span = activated.span("subscription");

        tokio::spawn(pump(runner, callback, arity, merged, handle.token()).instrument(span));

        Ok(vec![handle])
    }
}

async fn pump(
    runner: ConversionRunner,
    callback: ValueChangeFn,
    arity: usize,
    mut merged: SlotStream,
    token: CancellationToken,
) {
    let mut combiner = Combiner::new(arity);
    let mut debouncer = Debouncer::new(DEBOUNCE_WINDOW);
    let fire = |values: Vec<Option<Value>>| {
        runner.invoke(|| callback(&values));
    };

    let reason = loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            biased;
            _ = token.cancelled() => break "cancelled",
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(values) = debouncer.expire(Instant::now()) {
                    fire(values);
                }
            }
            update = merged.next() => match update {
                Some((slot, value)) => {
                    if let Some(values) = combiner.update(slot, value) {
                        if let Some(values) = debouncer.offer(values, Instant::now()) {
                            fire(values);
                        }
                    }
                }
                None => break "value streams closed",
            },
        }
    };

    // A burst cut short by the sources closing still gets its trailing call.
    if reason != "cancelled" {
        if let (Some(deadline), Some(values)) = (debouncer.deadline(), debouncer.take_pending()) {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep_until(deadline) => fire(values),
            }
        }
    }

    SubscriptionEnded {
        conversion: runner.conversion().title(),
        trigger: "value-change",
        reason,
    }
    .log();
}
