// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod options;
mod validation;

pub mod consts;

pub use loader::{load_config, parse_config, BridgeConfig, ConfigFormat, LoggingConfig};
pub use options::{ConversionOptions, ResolvedOptions};
pub use validation::validate_options;
