// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion definitions: what a conversion listens to, how its transform is
//! invoked, and the descriptors it produces.
//!
//! A [`Conversion`] pairs a [`Trigger`] (value-change, raw-event or timer, each
//! carrying its transform callback) with an [`OutputDiscipline`]. Conversions
//! are collected in a [`ConversionRegistry`], either directly or through a
//! configured entry whose builder expands typed options into conversions.

mod delta;
mod descriptor;
mod registry;
mod trigger;

pub use delta::{Delta, PathValue, Update};
pub use descriptor::{Batch, FieldMap, MessageBody, MessageDescriptor};
pub use registry::{CatalogEntry, ConversionBuilder, ConversionRegistry, RegistryEntry};
pub use trigger::{
    InputBinding, RawEventFn, TimerFn, TransformResult, Trigger, TriggerKind, ValueChangeFn,
};

use serde::Deserialize;
use std::fmt;

/// How a conversion's descriptors become bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputDiscipline {
    /// Named fields handed to the protocol encoder.
    ProtocolEncode,
    /// Payload bytes already produced by the transform.
    RawBuffer,
}

impl fmt::Display for OutputDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputDiscipline::ProtocolEncode => write!(f, "protocol-encode"),
            OutputDiscipline::RawBuffer => write!(f, "raw-buffer"),
        }
    }
}

/// A named transformation unit, immutable once built.
#[derive(Debug, Clone)]
pub struct Conversion {
    option_key: String,
    title: String,
    trigger: Trigger,
    output: OutputDiscipline,
}

impl Conversion {
    /// Conversion whose descriptors carry named fields for the protocol encoder.
    pub fn new(option_key: impl Into<String>, title: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            option_key: option_key.into(),
            title: title.into(),
            trigger,
            output: OutputDiscipline::ProtocolEncode,
        }
    }

    /// Same conversion with a different output discipline.
    pub fn with_output(mut self, output: OutputDiscipline) -> Self {
        self.output = output;
        self
    }

    pub fn option_key(&self) -> &str {
        &self.option_key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn output(&self) -> OutputDiscipline {
        self.output
    }

    /// Check the shape of the conversion before it is activated.
    ///
    /// Value-change conversions need at least one input, slots numbered
    /// `0..n` in order, non-empty paths, and a declared arity equal to the
    /// number of bindings. Timer conversions need a non-zero interval.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        let invalid = |reason: String| crate::errors::ConfigError::InvalidConversion {
            conversion: self.title.clone(),
            reason,
        };

        match &self.trigger {
            Trigger::ValueChange { inputs, arity, .. } => {
                if inputs.is_empty() {
                    return Err(invalid("value-change conversion has no inputs".to_string()));
                }
                if *arity != inputs.len() {
                    return Err(invalid(format!(
                        "callback takes {} values but {} inputs are bound",
                        arity,
                        inputs.len()
                    )));
                }
                for (position, binding) in inputs.iter().enumerate() {
                    if binding.slot != position {
                        return Err(invalid(format!(
                            "input '{}' is bound to slot {} but sits at position {}",
                            binding.path, binding.slot, position
                        )));
                    }
                    if binding.path.is_empty() {
                        return Err(invalid(format!("input in slot {} has an empty path", position)));
                    }
                }
                Ok(())
            }
            Trigger::Timer { interval, .. } if interval.is_zero() => {
                Err(invalid("timer interval must be greater than zero".to_string()))
            }
            Trigger::Timer { .. } | Trigger::RawEvent { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn noop_values(inputs: Vec<InputBinding>, arity: usize) -> Trigger {
        Trigger::ValueChange {
            inputs,
            arity,
            callback: Arc::new(|_| Ok(None)),
        }
    }

    #[test]
    fn key_count_matches_callback_arity() {
        let trigger = Trigger::on_values(
            [
                InputBinding::new(0, "propulsion.port.revolutions"),
                InputBinding::new(1, "propulsion.port.boostPressure"),
                InputBinding::new(2, "propulsion.port.drive.trimState"),
            ],
            |[_rev, _boost, _trim]| Ok(None),
        );
        let Trigger::ValueChange { inputs, arity, .. } = &trigger else {
            panic!("expected value-change trigger");
        };
        assert_eq!(inputs.len(), 3);
        assert_eq!(*arity, 3);

        let conversion = Conversion::new("ENGINE", "Engine", trigger);
        assert!(conversion.validate().is_ok());
    }

    #[test]
    fn arity_mismatch_is_invalid() {
        let conversion = Conversion::new(
            "X",
            "X",
            noop_values(vec![InputBinding::new(0, "a"), InputBinding::new(1, "b")], 3),
        );
        let err = conversion.validate().unwrap_err();
        assert!(err.to_string().contains("callback takes 3 values but 2 inputs are bound"));
    }

    #[test]
    fn misaligned_slots_are_invalid() {
        let conversion = Conversion::new(
            "X",
            "X",
            noop_values(vec![InputBinding::new(1, "a"), InputBinding::new(0, "b")], 2),
        );
        assert!(conversion.validate().is_err());
    }

    #[test]
    fn empty_inputs_are_invalid() {
        let conversion = Conversion::new("X", "X", noop_values(vec![], 0));
        assert!(conversion.validate().is_err());
    }

    #[test]
    fn zero_interval_timer_is_invalid() {
        let conversion = Conversion::new("T", "T", Trigger::every(Duration::ZERO, |_| Ok(None)));
        assert!(conversion.validate().is_err());
    }

    #[test]
    fn defaults_to_protocol_encode() {
        let conversion = Conversion::new("T", "T", Trigger::every(Duration::from_secs(1), |_| Ok(None)));
        assert_eq!(conversion.output(), OutputDiscipline::ProtocolEncode);
        let raw = conversion.with_output(OutputDiscipline::RawBuffer);
        assert_eq!(raw.output(), OutputDiscipline::RawBuffer);
        assert_eq!(raw.output().to_string(), "raw-buffer");
    }
}
