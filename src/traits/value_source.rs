// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::stream::BoxStream;
use serde_json::Value;
use std::time::Duration;

use crate::conversion::Delta;

/// Latest-value stream for one path. `None` items mean "no value / stale".
pub type ValueStream = BoxStream<'static, Option<Value>>;

/// Every delta, unfiltered.
pub type DeltaStream = BoxStream<'static, Delta>;

/// Per-path latest values.
///
/// The staleness timeout is enforced here, not by the engine: when a path sees
/// no fresh update for `staleness`, the stream yields `None`.
pub trait ValueSource: Send + Sync {
    /// Stream of the latest value at `path`. Yields the current value first when
    /// one is already known.
    fn latest_stream(&self, path: &str, staleness: Option<Duration>) -> ValueStream;

    /// Current value at `path`, if any.
    fn latest(&self, path: &str) -> Option<Value>;
}

/// Feed of raw deltas.
pub trait RawEventFeed: Send + Sync {
    fn subscribe(&self) -> DeltaStream;
}
