// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::ResolvedOptions;
use crate::engine::OutboundChannel;
use crate::traits::ValueSource;

/// Shared application context handed to raw-event and timer callbacks.
///
/// Cheap to clone; every runner of one engine start shares the same
/// options snapshot.
#[derive(Clone)]
pub struct AppContext {
    values: Arc<dyn ValueSource>,
    outbound: OutboundChannel,
    options: Arc<ResolvedOptions>,
}

impl AppContext {
    pub fn new(values: Arc<dyn ValueSource>, outbound: OutboundChannel, options: Arc<ResolvedOptions>) -> Self {
        Self {
            values,
            outbound,
            options,
        }
    }

    /// Latest known value at `path`.
    pub fn latest(&self, path: &str) -> Option<Value> {
        self.values.latest(path)
    }

    pub fn outbound(&self) -> &OutboundChannel {
        &self.outbound
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("outbound", &self.outbound.name())
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}
