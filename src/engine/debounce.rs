// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use tokio::time::Instant;

/// Leading-edge debouncer with a trailing flush.
///
/// ```text
///  offer, window since last emission elapsed ──▶ emit now
///  offer, inside that window ──▶ hold as pending, flush due at now+window
///  flush due, pending ──▶ emit pending
/// ```
///
/// Suppression is measured from the last emission, so a steady stream of
/// offers still passes roughly one item per window. A held item is dropped
/// when a later offer passes through.
///
/// The caller drives time: it sleeps until [`Debouncer::deadline`] and then
/// calls [`Debouncer::expire`].
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    last_emit: Option<Instant>,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a new item. Returns it back when it should be emitted right away.
    pub fn offer(&mut self, item: T, now: Instant) -> Option<T> {
        if self.cooling(now) {
            self.pending = Some((item, now + self.window));
            None
        } else {
            self.pending = None;
            self.last_emit = Some(now);
            Some(item)
        }
    }

    /// Handle a fired deadline. Returns the held item once its flush is due.
    pub fn expire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if due <= now => {}
            _ => return None,
        }
        let (item, _) = self.pending.take()?;
        self.last_emit = Some(now);
        Some(item)
    }

    /// When the caller should next call [`Debouncer::expire`]; `None` when
    /// nothing is held.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Drop timing state and hand back anything still held.
    pub fn take_pending(&mut self) -> Option<T> {
        self.last_emit = None;
        self.pending.take().map(|(item, _)| item)
    }

    fn cooling(&self, now: Instant) -> bool {
        self.last_emit.is_some_and(|at| now < at + self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(20);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn isolated_item_passes_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        assert_eq!(debouncer.offer(1, start), Some(1));
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.expire(start + WINDOW), None);
        assert_eq!(debouncer.offer(2, start + WINDOW), Some(2));
    }

    #[test]
    fn burst_collapses_to_last_item() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        assert_eq!(debouncer.offer(0, start), Some(0));
        assert_eq!(debouncer.offer(5, start + ms(5)), None);
        assert_eq!(debouncer.offer(10, start + ms(10)), None);

        // The flush waits for a quiet window after the last held offer.
        assert_eq!(debouncer.deadline(), Some(start + ms(30)));
        assert_eq!(debouncer.expire(start + ms(25)), None);
        assert_eq!(debouncer.expire(start + ms(30)), Some(10));
        assert_eq!(debouncer.deadline(), None);

        // The flush counts as an emission.
        assert_eq!(debouncer.offer(40, start + ms(40)), None);
        assert_eq!(debouncer.offer(99, start + ms(200)), Some(99));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn steady_offers_pass_once_per_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        let passed: Vec<u64> = (0..10u64)
            .map(|step| step * 10)
            .filter(|at| debouncer.offer(*at, start + ms(*at)).is_some())
            .collect();
        assert_eq!(passed, vec![0, 20, 40, 60, 80]);

        // Only the last offer is still held.
        assert_eq!(debouncer.deadline(), Some(start + ms(110)));
        assert_eq!(debouncer.expire(start + ms(110)), Some(90));
    }

    #[test]
    fn take_pending_resets() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.offer("a", start);
        debouncer.offer("b", start + ms(1));
        assert_eq!(debouncer.take_pending(), Some("b"));
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.offer("c", start + ms(2)), Some("c"));
    }
}
