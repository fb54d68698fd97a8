// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory value store.
//!
//! Keeps the latest value per path in a `watch` channel and rebroadcasts
//! every applied delta to raw event subscribers.

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

use crate::config::consts::RAW_EVENT_CAPACITY;
use crate::conversion::Delta;
use crate::observability::messages::source::RawEventsLagged;
use crate::observability::messages::StructuredLog;
use crate::traits::{DeltaStream, RawEventFeed, ValueSource, ValueStream};

#[derive(Debug, Clone, PartialEq)]
enum Sample {
    Unset,
    Set(Option<Value>),
}

struct Inner {
    paths: Mutex<HashMap<String, watch::Sender<Sample>>>,
    deltas: broadcast::Sender<Delta>,
}

/// Latest-value store fed by [`publish`](Self::publish) and
/// [`apply_delta`](Self::apply_delta). Clones share state.
#[derive(Clone)]
pub struct MemoryValueSource {
    inner: Arc<Inner>,
}

impl MemoryValueSource {
    pub fn new() -> Self {
        let (deltas, _) = broadcast::channel(RAW_EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                paths: Mutex::new(HashMap::new()),
                deltas,
            }),
        }
    }

    /// Set one path and announce it as a single-value delta.
    pub fn publish(&self, path: &str, value: Value) {
        self.apply_delta(Delta::single(path, value));
    }

    /// Store every value in `delta`, then hand the delta to raw subscribers.
    ///
    /// JSON `null` is stored as an absent value.
    pub fn apply_delta(&self, delta: Delta) {
        {
            let mut paths = self.inner.paths.lock();
            for entry in delta.values() {
                let value = match &entry.value {
                    Value::Null => None,
                    other => Some(other.clone()),
                };
                Self::sender(&mut paths, &entry.path).send_replace(Sample::Set(value));
            }
        }
        // No raw subscribers is not an error.
        let _ = self.inner.deltas.send(delta);
    }

    /// Apply one line of text input.
    ///
    /// Accepts a JSON delta (`{"updates":[...]}`) or `path=value`, where the
    /// value is parsed as JSON and falls back to a plain string. Blank lines
    /// and `#` comments are ignored. Returns the number of values applied.
    pub fn ingest_line(&self, line: &str) -> Result<usize, serde_json::Error> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(0);
        }

        if line.starts_with('{') {
            let delta: Delta = serde_json::from_str(line)?;
            let count = delta.values().count();
            self.apply_delta(delta);
            return Ok(count);
        }

        match line.split_once('=') {
            Some((path, raw)) if !path.trim().is_empty() => {
                let raw = raw.trim();
                let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
                self.publish(path.trim(), value);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    fn sender<'a>(paths: &'a mut HashMap<String, watch::Sender<Sample>>, path: &str) -> &'a watch::Sender<Sample> {
        paths
            .entry(path.to_string())
            .or_insert_with(|| watch::channel(Sample::Unset).0)
    }

    fn receiver(&self, path: &str) -> watch::Receiver<Sample> {
        let mut paths = self.inner.paths.lock();
        Self::sender(&mut paths, path).subscribe()
    }
}

impl Default for MemoryValueSource {
    fn default() -> Self {
        Self::new()
    }
}

struct Watcher {
    rx: watch::Receiver<Sample>,
    staleness: Option<Duration>,
    primed: bool,
    fresh: bool,
}

impl Watcher {
    fn take(&mut self) -> Option<Option<Value>> {
        match &*self.rx.borrow_and_update() {
            Sample::Set(value) => Some(value.clone()),
            Sample::Unset => None,
        }
    }
}

impl ValueSource for MemoryValueSource {
    /// Yields the stored value first when one exists, then every update.
    ///
    /// With a staleness timeout, a value not refreshed in time is followed
    /// by a single `None`.
    fn latest_stream(&self, path: &str, staleness: Option<Duration>) -> ValueStream {
        let watcher = Watcher {
            rx: self.receiver(path),
            staleness,
            primed: false,
            fresh: false,
        };

        stream::unfold(watcher, |mut watcher| async move {
            if !watcher.primed {
                watcher.primed = true;
                if let Some(value) = watcher.take() {
                    watcher.fresh = value.is_some();
                    return Some((value, watcher));
                }
            }

            loop {
                let changed = match watcher.staleness.filter(|_| watcher.fresh) {
                    Some(timeout) => match tokio::time::timeout(timeout, watcher.rx.changed()).await {
                        Ok(changed) => changed,
                        Err(_) => {
                            watcher.fresh = false;
                            return Some((None, watcher));
                        }
                    },
                    None => watcher.rx.changed().await,
                };
                if changed.is_err() {
                    return None;
                }
                if let Some(value) = watcher.take() {
                    watcher.fresh = value.is_some();
                    return Some((value, watcher));
                }
            }
        })
        .boxed()
    }

    fn latest(&self, path: &str) -> Option<Value> {
        let paths = self.inner.paths.lock();
        match paths.get(path).map(|sender| sender.borrow().clone()) {
            Some(Sample::Set(value)) => value,
            _ => None,
        }
    }
}

impl RawEventFeed for MemoryValueSource {
    fn subscribe(&self) -> DeltaStream {
        stream::unfold(self.inner.deltas.subscribe(), |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(delta) => return Some((delta, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => RawEventsLagged { skipped }.log(),
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::time::{self, timeout};

    const SHORT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn stream_starts_with_current_value() {
        let source = MemoryValueSource::new();
        source.publish("propulsion.port.revolutions", json!(25.0));

        let mut stream = source.latest_stream("propulsion.port.revolutions", None);
        assert_eq!(stream.next().await, Some(Some(json!(25.0))));

        source.publish("propulsion.port.revolutions", json!(26.0));
        assert_eq!(stream.next().await, Some(Some(json!(26.0))));
    }

    #[tokio::test]
    async fn unknown_path_waits_for_first_value() {
        let source = MemoryValueSource::new();
        let mut stream = source.latest_stream("navigation.speedOverGround", None);
        assert!(timeout(SHORT, stream.next()).await.is_err());

        source.publish("navigation.speedOverGround", Value::Null);
        assert_eq!(stream.next().await, Some(None));
        assert_eq!(source.latest("navigation.speedOverGround"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_value_is_followed_by_one_null() {
        let source = MemoryValueSource::new();
        source.publish("propulsion.port.oilPressure", json!(300000));

        let mut stream = source.latest_stream("propulsion.port.oilPressure", Some(Duration::from_secs(10)));
        assert_eq!(stream.next().await, Some(Some(json!(300000))));

        let started = time::Instant::now();
        assert_eq!(stream.next().await, Some(None));
        assert!(started.elapsed() >= Duration::from_secs(10));

        // No second null while nothing new arrives.
        assert!(timeout(Duration::from_secs(60), stream.next()).await.is_err());

        source.publish("propulsion.port.oilPressure", json!(310000));
        assert_eq!(stream.next().await, Some(Some(json!(310000))));
    }

    #[tokio::test]
    async fn deltas_reach_raw_subscribers_and_values() {
        let source = MemoryValueSource::new();
        let mut feed = source.subscribe();

        let delta: Delta = serde_json::from_value(json!({
            "context": "vessels.self",
            "updates": [{
                "$source": "n2k.1",
                "values": [
                    {"path": "propulsion.port.temperature", "value": 355.15},
                    {"path": "propulsion.port.revolutions", "value": 30}
                ]
            }]
        }))
        .unwrap();
        source.apply_delta(delta.clone());

        assert_eq!(feed.next().await, Some(delta));
        assert_eq!(source.latest("propulsion.port.temperature"), Some(json!(355.15)));
        assert_eq!(source.latest("propulsion.port.revolutions"), Some(json!(30)));
    }

    #[test]
    fn ingest_line_accepts_assignments_and_deltas() {
        let source = MemoryValueSource::new();

        assert_eq!(source.ingest_line("propulsion.port.revolutions = 12.5").unwrap(), 1);
        assert_eq!(source.latest("propulsion.port.revolutions"), Some(json!(12.5)));

        assert_eq!(source.ingest_line("navigation.state=motoring").unwrap(), 1);
        assert_eq!(source.latest("navigation.state"), Some(json!("motoring")));

        let delta = r#"{"updates":[{"values":[{"path":"a","value":1},{"path":"b","value":2}]}]}"#;
        assert_eq!(source.ingest_line(delta).unwrap(), 2);
        assert_eq!(source.latest("b"), Some(json!(2)));

        assert_eq!(source.ingest_line("   ").unwrap(), 0);
        assert_eq!(source.ingest_line("# comment").unwrap(), 0);
        assert_eq!(source.ingest_line("no assignment").unwrap(), 0);
        assert!(source.ingest_line("{not json").is_err());
    }
}
