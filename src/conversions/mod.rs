// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in conversion catalog.
//!
//! | Option key            | Trigger      | Output            |
//! |-----------------------|--------------|-------------------|
//! | `ENGINE_PARAMETERS`   | value-change | 127489 + 127488   |
//! | `EXHAUST_TEMPERATURE` | value-change | 130312            |
//! | `SYSTEM_TIME`         | timer        | 126992 raw buffer |
//!
//! Engine conversions are configured with an `engines` list mapping each
//! Signal K engine id to its NMEA 2000 instance numbers.

mod engine_parameters;
mod exhaust_temperature;
mod system_time;

use serde::Deserialize;
use serde_json::Value;

use crate::config::ConversionOptions;
use crate::conversion::ConversionRegistry;
use crate::errors::{ConfigError, TransformError, ValidationError};

pub use engine_parameters::ENGINE_PARAMETERS;
pub use exhaust_temperature::EXHAUST_TEMPERATURE;
pub use system_time::SYSTEM_TIME;

/// Registry holding every built-in conversion.
pub fn builtin() -> Result<ConversionRegistry, ValidationError> {
    let mut registry = ConversionRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}

pub fn register_builtin(registry: &mut ConversionRegistry) -> Result<(), ValidationError> {
    exhaust_temperature::register(registry)?;
    engine_parameters::register(registry)?;
    system_time::register(registry)?;
    Ok(())
}

/// One entry of an `engines` option list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMapping {
    /// Signal K engine id, e.g. `port` in `propulsion.port.revolutions`.
    pub signalk_id: String,
    /// NMEA 2000 engine instance.
    #[serde(default)]
    pub instance_id: Option<u8>,
    /// NMEA 2000 temperature instance.
    #[serde(default)]
    pub temp_instance_id: Option<u8>,
}

impl EngineMapping {
    fn path(&self, key: &str) -> String {
        format!("propulsion.{}.{}", self.signalk_id, key)
    }
}

/// Read the `engines` list, requiring `pick` to yield an instance for each.
fn engines(
    options: &ConversionOptions,
    instance_field: &str,
    pick: fn(&EngineMapping) -> Option<u8>,
) -> Result<Vec<(EngineMapping, u8)>, ConfigError> {
    let engines: Vec<EngineMapping> = options.setting("engines")?;
    engines
        .into_iter()
        .map(|engine| match pick(&engine) {
            Some(instance) => Ok((engine, instance)),
            None => Err(ConfigError::MissingOption {
                option_key: options.option_key().to_string(),
                field: format!("engines[{}].{}", engine.signalk_id, instance_field),
            }),
        })
        .collect()
}

/// Multiply a numeric input by `factor`; absent stays null.
fn scaled(value: &Option<Value>, factor: f64, path: &str) -> Result<Value, TransformError> {
    match value {
        None => Ok(Value::Null),
        Some(value) => value
            .as_f64()
            .map(|n| Value::from(n * factor))
            .ok_or_else(|| TransformError::failed(format!("{} is not a number: {}", path, value))),
    }
}
