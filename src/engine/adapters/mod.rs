// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Source adapters, one per trigger discipline.
//!
//! Each adapter turns an activated conversion into a background task that
//! calls [`ConversionRunner::invoke`](crate::engine::ConversionRunner::invoke)
//! whenever its trigger fires, and returns the handles that cancel the task.

mod raw_event;
mod timer;
mod value_change;

pub use raw_event::RawEventAdapter;
pub use timer::TimerAdapter;
pub use value_change::ValueChangeAdapter;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::conversion::TriggerKind;
use crate::engine::ConversionRunner;
use crate::errors::ConfigError;
use crate::traits::SourceAdapter;

/// Installed adapters, keyed by the trigger kind they serve.
#[derive(Clone, Default)]
pub struct AdapterSet {
    adapters: HashMap<TriggerKind, Arc<dyn SourceAdapter>>,
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `adapter`, replacing any adapter already serving its kind.
    pub fn insert(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    pub fn get(&self, kind: TriggerKind) -> Option<&Arc<dyn SourceAdapter>> {
        self.adapters.get(&kind)
    }
}

impl fmt::Debug for AdapterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.adapters.keys().map(ToString::to_string).collect();
        kinds.sort();
        f.debug_struct("AdapterSet").field("kinds", &kinds).finish()
    }
}

/// Error for a runner handed to an adapter of the wrong kind.
fn unsupported(runner: &ConversionRunner) -> ConfigError {
    ConfigError::UnsupportedTrigger {
        conversion: runner.conversion().title().to_string(),
        trigger: runner.conversion().trigger().kind(),
    }
}

/// Subscription label: `<title>/<trigger>`.
fn label(runner: &ConversionRunner) -> String {
    format!("{}/{}", runner.conversion().title(), runner.conversion().trigger().kind())
}
