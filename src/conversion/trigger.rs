// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::conversion::{Batch, Delta};
use crate::engine::AppContext;
use crate::errors::TransformError;

/// What a transform returns: an optional batch, or a callback error.
///
/// `Ok(None)` means "nothing to emit this time" and is not an error.
pub type TransformResult = Result<Option<Batch>, TransformError>;

/// Positional callback over the latest value of every bound input.
pub type ValueChangeFn = Arc<dyn Fn(&[Option<Value>]) -> TransformResult + Send + Sync>;

/// Callback over every raw delta plus the application context.
pub type RawEventFn = Arc<dyn Fn(&Delta, &AppContext) -> TransformResult + Send + Sync>;

/// Callback invoked on each timer tick.
pub type TimerFn = Arc<dyn Fn(&AppContext) -> TransformResult + Send + Sync>;

/// Trigger discipline tag, used to select a source adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    ValueChange,
    RawEvent,
    Timer,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerKind::ValueChange => "value-change",
            TriggerKind::RawEvent => "raw-event",
            TriggerKind::Timer => "timer",
        };
        f.write_str(name)
    }
}

/// Explicit pairing of a source path with the callback argument it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBinding {
    /// Positional argument index in the callback.
    pub slot: usize,
    /// Source path key, e.g. `propulsion.port.revolutions`.
    pub path: String,
    /// Staleness timeout passed through to the value source.
    pub staleness: Option<Duration>,
}

impl InputBinding {
    pub fn new(slot: usize, path: impl Into<String>) -> Self {
        Self {
            slot,
            path: path.into(),
            staleness: None,
        }
    }

    pub fn with_staleness(mut self, timeout: Duration) -> Self {
        self.staleness = Some(timeout);
        self
    }
}

/// How and when a conversion's transform is invoked, with the callback itself.
#[derive(Clone)]
pub enum Trigger {
    /// Combine the latest values of `inputs`, debounced, and call positionally.
    ValueChange {
        inputs: Vec<InputBinding>,
        arity: usize,
        callback: ValueChangeFn,
    },
    /// Call on every raw delta. No combine, no debounce.
    RawEvent { callback: RawEventFn },
    /// Call every `interval`, first call one interval after activation.
    Timer { interval: Duration, callback: TimerFn },
}

impl Trigger {
    /// Value-change trigger with a fixed number of inputs.
    ///
    /// The callback receives an array of the same length as `inputs`, so the
    /// key count and the callback arity cannot drift apart.
    ///
    /// # Example
    /// ```
    /// use sk_to_n2k::conversion::{InputBinding, Trigger};
    ///
    /// let trigger = Trigger::on_values(
    ///     [
    ///         InputBinding::new(0, "environment.depth.belowTransducer"),
    ///         InputBinding::new(1, "environment.depth.transducerToKeel"),
    ///     ],
    ///     |[_depth, _offset]| Ok(None),
    /// );
    /// assert_eq!(trigger.kind().to_string(), "value-change");
    /// ```
    pub fn on_values<const N: usize, F>(inputs: [InputBinding; N], callback: F) -> Self
    where
        F: Fn([Option<Value>; N]) -> TransformResult + Send + Sync + 'static,
    {
        let callback: ValueChangeFn = Arc::new(move |values: &[Option<Value>]| {
            let positional: [Option<Value>; N] =
                values
                    .to_vec()
                    .try_into()
                    .map_err(|rejected: Vec<Option<Value>>| TransformError::ArityMismatch {
                        expected: N,
                        actual: rejected.len(),
                    })?;
            callback(positional)
        });

        Trigger::ValueChange {
            inputs: inputs.into(),
            arity: N,
            callback,
        }
    }

    /// Raw-event trigger. Prefer value-change triggers where possible; this one
    /// sees every delta and must do its own filtering.
    pub fn on_delta<F>(callback: F) -> Self
    where
        F: Fn(&Delta, &AppContext) -> TransformResult + Send + Sync + 'static,
    {
        Trigger::RawEvent {
            callback: Arc::new(callback),
        }
    }

    /// Timer trigger.
    pub fn every<F>(interval: Duration, callback: F) -> Self
    where
        F: Fn(&AppContext) -> TransformResult + Send + Sync + 'static,
    {
        Trigger::Timer {
            interval,
            callback: Arc::new(callback),
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::ValueChange { .. } => TriggerKind::ValueChange,
            Trigger::RawEvent { .. } => TriggerKind::RawEvent,
            Trigger::Timer { .. } => TriggerKind::Timer,
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::ValueChange { inputs, arity, .. } => f
                .debug_struct("ValueChange")
                .field("inputs", inputs)
                .field("arity", arity)
                .finish_non_exhaustive(),
            Trigger::RawEvent { .. } => f.debug_struct("RawEvent").finish_non_exhaustive(),
            Trigger::Timer { interval, .. } => f
                .debug_struct("Timer")
                .field("interval", interval)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_callback_receives_values_in_slot_order() {
        let trigger = Trigger::on_values(
            [InputBinding::new(0, "a"), InputBinding::new(1, "b")],
            |[a, b]| {
                assert_eq!(a, Some(json!(1)));
                assert_eq!(b, None);
                Ok(None)
            },
        );
        let Trigger::ValueChange { callback, .. } = trigger else {
            panic!("expected value-change trigger");
        };
        assert_eq!(callback(&[Some(json!(1)), None]), Ok(None));
    }

    #[test]
    fn wrong_value_count_is_an_arity_error() {
        let trigger = Trigger::on_values([InputBinding::new(0, "a")], |[_a]| Ok(None));
        let Trigger::ValueChange { callback, .. } = trigger else {
            panic!("expected value-change trigger");
        };
        assert_eq!(
            callback(&[None, None]),
            Err(TransformError::ArityMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(TriggerKind::ValueChange.to_string(), "value-change");
        assert_eq!(TriggerKind::RawEvent.to_string(), "raw-event");
        assert_eq!(TriggerKind::Timer.to_string(), "timer");
    }

    #[test]
    fn staleness_is_carried_on_the_binding() {
        let binding = InputBinding::new(0, "a").with_staleness(Duration::from_secs(10));
        assert_eq!(binding.staleness, Some(Duration::from_secs(10)));
    }
}
