// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

/// Latest value per input slot, gated by a cold-start barrier.
///
/// Nothing is produced until every slot has reported at least once. A null
/// report counts. After that, every update yields a fresh snapshot.
#[derive(Debug, Clone)]
pub struct Combiner {
    latest: Vec<Option<Value>>,
    seen: Vec<bool>,
    pending: usize,
}

impl Combiner {
    pub fn new(arity: usize) -> Self {
        Self {
            latest: vec![None; arity],
            seen: vec![false; arity],
            pending: arity,
        }
    }

    /// Record `value` for `slot`. Returns the full tuple once the barrier is met.
    ///
    /// Updates for slots outside the arity are ignored.
    pub fn update(&mut self, slot: usize, value: Option<Value>) -> Option<Vec<Option<Value>>> {
        let current = self.latest.get_mut(slot)?;
        *current = value;
        if !self.seen[slot] {
            self.seen[slot] = true;
            self.pending -= 1;
        }
        self.is_ready().then(|| self.latest.clone())
    }

    pub fn is_ready(&self) -> bool {
        self.pending == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn waits_for_every_slot() {
        let mut combiner = Combiner::new(3);
        assert_eq!(combiner.update(0, Some(json!(1))), None);
        assert_eq!(combiner.update(2, Some(json!(3))), None);
        assert_eq!(combiner.update(0, Some(json!(10))), None);
        assert_eq!(
            combiner.update(1, Some(json!(2))),
            Some(vec![Some(json!(10)), Some(json!(2)), Some(json!(3))])
        );
    }

    #[test]
    fn null_satisfies_the_barrier() {
        let mut combiner = Combiner::new(2);
        assert_eq!(combiner.update(0, None), None);
        assert_eq!(combiner.update(1, Some(json!(true))), Some(vec![None, Some(json!(true))]));
    }

    #[test]
    fn later_updates_replace_one_slot() {
        let mut combiner = Combiner::new(2);
        combiner.update(0, Some(json!(1)));
        combiner.update(1, Some(json!(2)));
        assert_eq!(combiner.update(1, None), Some(vec![Some(json!(1)), None]));
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut combiner = Combiner::new(1);
        assert_eq!(combiner.update(4, Some(json!(1))), None);
        assert!(!combiner.is_ready());
    }
}
