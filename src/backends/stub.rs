// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Instant;

use crate::backends::memory::MemoryValueSource;
use crate::config::ResolvedOptions;
use crate::conversion::FieldMap;
use crate::engine::{AppContext, OutboundChannel};
use crate::errors::EncodingError;
use crate::traits::ProtocolEncoder;

/// Encoder for tests: fails or panics on chosen PGNs, otherwise writes one
/// byte per field (numbers truncated, everything else `0xff`).
#[derive(Debug, Default, Clone)]
pub struct StubEncoder {
    fail_on: HashSet<u32>,
    panic_on: HashSet<u32>,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, pgn: u32) -> Self {
        self.fail_on.insert(pgn);
        self
    }

    pub fn panicking_on(mut self, pgn: u32) -> Self {
        self.panic_on.insert(pgn);
        self
    }
}

impl ProtocolEncoder for StubEncoder {
    fn encode(&self, pgn: u32, fields: &FieldMap) -> Result<Vec<u8>, EncodingError> {
        if self.panic_on.contains(&pgn) {
            panic!("stub encoder panicked on pgn {}", pgn);
        }
        if self.fail_on.contains(&pgn) {
            return Err(EncodingError::UnknownPgn(pgn));
        }
        Ok(fields
            .values()
            .map(|value| match value {
                Value::Number(n) => n.as_f64().map(|f| f as u8).unwrap_or(0xff),
                _ => 0xff,
            })
            .collect())
    }
}

/// Context over an empty in-memory source with no options.
pub fn test_context() -> AppContext {
    AppContext::new(
        Arc::new(MemoryValueSource::new()),
        OutboundChannel::new(),
        Arc::new(ResolvedOptions::new()),
    )
}

/// Records every transform invocation with the (paused-clock) time it ran.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(Instant, Vec<Option<Value>>)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, values: &[Option<Value>]) {
        self.calls.lock().push((Instant::now(), values.to_vec()));
    }

    pub fn calls(&self) -> Vec<(Instant, Vec<Option<Value>>)> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}
