use std::collections::VecDeque;

use tracing::trace;

use super::types::LedgerEntry;
use crate::error::{Error, Result};

/// Bounded last-in first-out undo log.
///
/// Newest entry sits at the front. When a depth cap is set, recording past
/// it silently drops the oldest entry.
#[derive(Debug, Clone)]
pub struct MutationLedger<K, T> {
    entries: VecDeque<LedgerEntry<K, T>>,
    max_depth: Option<usize>,
}

impl<K, T> Default for MutationLedger<K, T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<K, T> MutationLedger<K, T> {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_depth,
        }
    }

    pub fn record(&mut self, entry: LedgerEntry<K, T>) {
        if self.max_depth == Some(0) {
            return;
        }
        self.entries.push_front(entry);
        if let Some(max) = self.max_depth {
            while self.entries.len() > max {
                self.entries.pop_back();
                trace!(max, "ledger full, evicted oldest entry");
            }
        }
    }

    /// Remove the most recent entry. Restoring state is the caller's job.
    pub fn pop(&mut self) -> Result<LedgerEntry<K, T>, K> {
        self.entries.pop_front().ok_or(Error::UndoNotAvailable)
    }

    pub fn peek(&self) -> Option<&LedgerEntry<K, T>> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry<K, T>> {
        self.entries.iter()
    }
}

impl<K: PartialEq, T> MutationLedger<K, T> {
    /// Drop every entry naming `id`. Returns how many were dropped.
    pub fn forget(&mut self, id: &K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{Operation, Prior};

    fn mutate(id: &'static str, score: i64) -> LedgerEntry<&'static str, i64> {
        LedgerEntry::mutate(
            id,
            Prior {
                score,
                seq: 0,
                payload: score,
            },
        )
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut ledger = MutationLedger::default();
        ledger.record(LedgerEntry::insert("A"));
        ledger.record(mutate("A", 3));

        let top = ledger.pop().unwrap();
        assert_eq!(top.operation, Operation::Mutate);
        let next = ledger.pop().unwrap();
        assert_eq!(next.operation, Operation::Insert);
        assert_eq!(ledger.pop(), Err(Error::UndoNotAvailable));
    }

    #[test]
    fn test_depth_cap_evicts_oldest() {
        let mut ledger = MutationLedger::new(Some(2));
        ledger.record(mutate("A", 1));
        ledger.record(mutate("B", 2));
        ledger.record(mutate("C", 3));

        assert_eq!(ledger.len(), 2);
        let ids: Vec<_> = ledger.iter().map(|e| *e.id()).collect();
        assert_eq!(ids, vec!["C", "B"]);
    }

    #[test]
    fn test_zero_depth_keeps_nothing() {
        let mut ledger = MutationLedger::new(Some(0));
        ledger.record(LedgerEntry::<_, ()>::insert("A"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut ledger = MutationLedger::default();
        ledger.record(LedgerEntry::<_, ()>::insert("A"));
        ledger.record(LedgerEntry::<_, ()>::insert("B"));
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.peek().is_none());
    }

    #[test]
    fn test_forget_drops_only_matching() {
        let mut ledger = MutationLedger::default();
        ledger.record(LedgerEntry::insert("A"));
        ledger.record(mutate("B", 1));
        ledger.record(mutate("A", 2));

        assert_eq!(ledger.forget(&"A"), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.peek().unwrap().id(), &"B");
    }
}
