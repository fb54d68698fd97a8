// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::conversion::TriggerKind;
use crate::engine::{ConversionRunner, SubscriptionHandle};
use crate::errors::ConfigError;

/// One trigger discipline's way of invoking a conversion.
///
/// `activate` spawns whatever listens for the trigger and returns the handles
/// that stop it. It must be called from within a Tokio runtime. An adapter
/// handed a runner for a different trigger discipline returns
/// `ConfigError::UnsupportedTrigger`.
pub trait SourceAdapter: Send + Sync {
    fn kind(&self) -> TriggerKind;

    fn activate(&self, runner: ConversionRunner) -> Result<Vec<SubscriptionHandle>, ConfigError>;
}
