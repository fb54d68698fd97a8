// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::sync::broadcast;

use crate::config::consts::{OUTBOUND_CAPACITY, OUTBOUND_CHANNEL};

/// Named broadcast channel carrying encoded wire lines to transports.
///
/// Shared by every dispatcher of an engine. Emitting with no subscriber
/// attached drops the line.
#[derive(Debug, Clone)]
pub struct OutboundChannel {
    name: &'static str,
    sender: broadcast::Sender<String>,
}

impl OutboundChannel {
    pub fn new() -> Self {
        Self::with_capacity(OUTBOUND_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            name: OUTBOUND_CHANNEL,
            sender,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Publish one line. Returns `false` when nobody is subscribed.
    pub fn emit(&self, line: String) -> bool {
        self.sender.send(line).is_ok()
    }
}

impl Default for OutboundChannel {
    fn default() -> Self {
        Self::new()
    }
}
