// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading options and turning registered conversions into
//! running ones. None of these abort the engine: the offending conversion is
//! logged and skipped.

use crate::conversion::TriggerKind;
use thiserror::Error;

/// Errors that can occur while loading configuration or resolving a conversion.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// The file extension does not map to a supported format.
    #[error("Unsupported configuration format '{0}' (expected yaml, yml, toml or json)")]
    UnsupportedFormat(String),

    /// A conversion is enabled but a field it requires is absent.
    #[error("Conversion '{option_key}' is missing required option '{field}'")]
    MissingOption { option_key: String, field: String },

    /// A conversion option is present but does not match the expected shape.
    #[error("Conversion '{option_key}' has invalid options: {reason}")]
    InvalidOption { option_key: String, reason: String },

    /// No source adapter is installed for the conversion's trigger discipline.
    #[error("Unknown conversion type '{trigger}' for '{conversion}': no source adapter installed")]
    UnsupportedTrigger {
        conversion: String,
        trigger: TriggerKind,
    },

    /// The conversion definition itself is malformed.
    #[error("Conversion '{conversion}' is invalid: {reason}")]
    InvalidConversion { conversion: String, reason: String },
}

/// Errors detected when conversions are registered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Two registry entries share an option key.
    #[error("Duplicate conversion option key: '{option_key}'")]
    DuplicateOptionKey { option_key: String },

    /// An option key is empty.
    #[error("Conversion '{title}' has an empty option key")]
    EmptyOptionKey { title: String },

    /// The options name a key no registered conversion uses.
    #[error("Option key '{option_key}' does not match any registered conversion")]
    UnknownOptionKey { option_key: String },
}
