// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod encoding;
mod engine;
mod transform;

pub use config::{ConfigError, ValidationError};
pub use encoding::EncodingError;
pub use engine::EngineError;
pub use transform::TransformError;
