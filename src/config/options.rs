// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Options snapshot handed to the engine at start time.
//!
//! Each option key maps to a [`ConversionOptions`]: an `enabled` flag plus
//! whatever settings that conversion needs. Settings are read through typed
//! structs with [`ConversionOptions::setting`] / [`ConversionOptions::settings_as`]
//! so a missing or malformed field becomes a [`ConfigError`] instead of a
//! silent lookup miss.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::ConfigError;

/// Options for one option key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversionOptions {
    #[serde(skip)]
    option_key: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl ConversionOptions {
    /// Enabled with no settings.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_setting(mut self, field: impl Into<String>, value: Value) -> Self {
        self.settings.insert(field.into(), value);
        self
    }

    pub fn option_key(&self) -> &str {
        &self.option_key
    }

    /// Read one required setting as `T`.
    pub fn setting<T: DeserializeOwned>(&self, field: &str) -> Result<T, ConfigError> {
        let value = self
            .settings
            .get(field)
            .filter(|value| !value.is_null())
            .ok_or_else(|| ConfigError::MissingOption {
                option_key: self.option_key.clone(),
                field: field.to_string(),
            })?;

        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidOption {
            option_key: self.option_key.clone(),
            reason: format!("'{}': {}", field, e),
        })
    }

    /// Read all settings as one typed struct.
    pub fn settings_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.settings.clone())).map_err(|e| {
            ConfigError::InvalidOption {
                option_key: self.option_key.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// Options for every option key, resolved once before `start`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, ConversionOptions>")]
pub struct ResolvedOptions(HashMap<String, ConversionOptions>);

impl ResolvedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, option_key: impl Into<String>, mut options: ConversionOptions) {
        let option_key = option_key.into();
        options.option_key = option_key.clone();
        self.0.insert(option_key, options);
    }

    pub fn with(mut self, option_key: impl Into<String>, options: ConversionOptions) -> Self {
        self.insert(option_key, options);
        self
    }

    pub fn get(&self, option_key: &str) -> Option<&ConversionOptions> {
        self.0.get(option_key)
    }

    /// Options for `option_key` when present and enabled.
    pub fn enabled(&self, option_key: &str) -> Option<&ConversionOptions> {
        self.get(option_key).filter(|options| options.enabled)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, ConversionOptions>> for ResolvedOptions {
    fn from(map: HashMap<String, ConversionOptions>) -> Self {
        map.into_iter()
            .fold(ResolvedOptions::new(), |acc, (key, options)| acc.with(key, options))
    }
}
