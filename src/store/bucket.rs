use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::query::Query;
use crate::error::{Error, Result};

/// Which end of the score axis is served first.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lowest score is highest priority (triage levels 1..5).
    #[default]
    Ascending,
    /// Highest score is highest priority (risk scores 0..100).
    Descending,
}

impl Direction {
    /// True if `a` is served before `b`.
    pub fn precedes(&self, a: i64, b: i64) -> bool {
        match self {
            Direction::Ascending => a < b,
            Direction::Descending => a > b,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Slot<T> {
    pub(crate) score: i64,
    /// Arrival order in the current bucket; increases along every bucket.
    pub(crate) seq: u64,
    pub(crate) payload: T,
}

/// Borrowed view of a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef<'a, K, T> {
    pub id: &'a K,
    pub score: i64,
    pub payload: &'a T,
}

impl<K: Clone, T: Clone> EntryRef<'_, K, T> {
    pub fn cloned(&self) -> Entry<K, T> {
        Entry {
            id: self.id.clone(),
            score: self.score,
            payload: self.payload.clone(),
        }
    }
}

/// Entry taken out of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, T> {
    pub id: K,
    pub score: i64,
    pub payload: T,
}

/// Score-keyed FIFO buckets.
///
/// Every live identity lives in exactly one bucket, and a bucket is dropped
/// from the map as soon as its last entry leaves.
#[derive(Debug, Clone)]
pub struct ScoreBucketStore<K, T> {
    direction: Direction,
    buckets: BTreeMap<i64, VecDeque<K>>,
    entries: HashMap<K, Slot<T>>,
    next_seq: u64,
}

impl<K, T> ScoreBucketStore<K, T>
where
    K: Eq + Hash + Clone,
{
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            buckets: BTreeMap::new(),
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Append `id` to the tail of bucket `score`.
    pub fn insert(&mut self, id: K, score: i64, payload: T) -> Result<(), K> {
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateIdentity(id));
        }
        let seq = self.bump_seq();
        self.buckets.entry(score).or_default().push_back(id.clone());
        self.entries.insert(id, Slot { score, seq, payload });
        Ok(())
    }

    /// Remove and return the oldest entry of the highest-priority bucket.
    pub fn dequeue_highest(&mut self) -> Result<Entry<K, T>, K> {
        let score = self.highest_score().ok_or(Error::Empty)?;
        let id = self
            .buckets
            .get_mut(&score)
            .and_then(|bucket| bucket.pop_front())
            .ok_or(Error::Empty)?;
        self.drop_if_empty(score);
        let slot = self.entries.remove(&id).ok_or(Error::Empty)?;
        debug!(score, remaining = self.entries.len(), "dequeued entry");
        Ok(Entry {
            id,
            score: slot.score,
            payload: slot.payload,
        })
    }

    /// Same selection as [`dequeue_highest`](Self::dequeue_highest), without removal.
    pub fn peek_highest(&self) -> Result<EntryRef<'_, K, T>, K> {
        let score = self.highest_score().ok_or(Error::Empty)?;
        let id = self
            .buckets
            .get(&score)
            .and_then(|bucket| bucket.front())
            .ok_or(Error::Empty)?;
        self.get(id).ok_or(Error::Empty)
    }

    /// Remove `id` wherever it sits.
    pub fn remove(&mut self, id: &K) -> Result<Entry<K, T>, K> {
        let score = self.score_of(id).ok_or_else(|| Error::NotFound(id.clone()))?;
        let owned_id = self.unlink(id, score)?;
        let slot = self
            .entries
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        Ok(Entry {
            id: owned_id,
            score,
            payload: slot.payload,
        })
    }

    /// Move `id` from bucket `old` to the tail of bucket `new`.
    ///
    /// Remaining entries of `old` keep their relative order. The moved entry
    /// always goes to the back of `new`, even when `old == new`.
    pub fn move_bucket(&mut self, id: &K, old: i64, new: i64) -> Result<(), K> {
        if self.score_of(id) != Some(old) {
            return Err(Error::NotFound(id.clone()));
        }
        let owned_id = self.unlink(id, old)?;
        self.buckets.entry(new).or_default().push_back(owned_id);
        let seq = self.bump_seq();
        self.set_slot(id, new, seq);
        Ok(())
    }

    /// Put `id` back into bucket `score` under an earlier sequence number.
    ///
    /// The entry lands ahead of every entry that arrived after `seq`, so
    /// entries that left the bucket in the meantime do not shift it.
    pub(crate) fn reposition(&mut self, id: &K, score: i64, seq: u64) -> Result<(), K> {
        let old = self.score_of(id).ok_or_else(|| Error::NotFound(id.clone()))?;
        let owned_id = self.unlink(id, old)?;
        let entries = &self.entries;
        let bucket = self.buckets.entry(score).or_default();
        let index = bucket
            .iter()
            .position(|k| entries.get(k).is_some_and(|slot| slot.seq > seq))
            .unwrap_or(bucket.len());
        bucket.insert(index, owned_id);
        self.set_slot(id, score, seq);
        Ok(())
    }

    /// Arrival number of `id` in its current bucket.
    pub(crate) fn sequence(&self, id: &K) -> Option<u64> {
        self.entries.get(id).map(|slot| slot.seq)
    }

    /// Swap in a new payload, returning the old one.
    pub(crate) fn replace_payload(&mut self, id: &K, payload: T) -> Result<T, K> {
        let slot = self
            .entries
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        Ok(std::mem::replace(&mut slot.payload, payload))
    }

    /// Entries with `score >= min`, in priority order.
    pub fn query_at_or_above(&self, min: i64) -> Query<'_, K, T> {
        Query::new(self.buckets.range(min..), &self.entries, self.direction)
    }

    /// Entries with `score <= max`, in priority order.
    pub fn query_at_or_below(&self, max: i64) -> Query<'_, K, T> {
        Query::new(self.buckets.range(..=max), &self.entries, self.direction)
    }

    /// Every entry, in dequeue order.
    pub fn iter(&self) -> Query<'_, K, T> {
        Query::new(self.buckets.range(..), &self.entries, self.direction)
    }

    pub fn count_by_score(&self, score: i64) -> usize {
        self.buckets.get(&score).map_or(0, VecDeque::len)
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &K) -> Option<EntryRef<'_, K, T>> {
        self.entries.get_key_value(id).map(|(id, slot)| EntryRef {
            id,
            score: slot.score,
            payload: &slot.payload,
        })
    }

    pub fn score_of(&self, id: &K) -> Option<i64> {
        self.entries.get(id).map(|slot| slot.score)
    }

    /// Zero-based position of `id` within its bucket.
    pub fn position(&self, id: &K) -> Option<usize> {
        let score = self.score_of(id)?;
        self.buckets.get(&score)?.iter().position(|k| k == id)
    }

    /// Occupied scores, highest priority first.
    pub fn scores(&self) -> Vec<i64> {
        match self.direction {
            Direction::Ascending => self.buckets.keys().copied().collect(),
            Direction::Descending => self.buckets.keys().rev().copied().collect(),
        }
    }

    fn highest_score(&self) -> Option<i64> {
        match self.direction {
            Direction::Ascending => self.buckets.keys().next().copied(),
            Direction::Descending => self.buckets.keys().next_back().copied(),
        }
    }

    /// Take `id` out of bucket `score`, returning the stored key.
    fn unlink(&mut self, id: &K, score: i64) -> Result<K, K> {
        let bucket = self
            .buckets
            .get_mut(&score)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let index = bucket
            .iter()
            .position(|k| k == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let owned = bucket
            .remove(index)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        self.drop_if_empty(score);
        Ok(owned)
    }

    fn drop_if_empty(&mut self, score: i64) {
        if self.buckets.get(&score).is_some_and(VecDeque::is_empty) {
            self.buckets.remove(&score);
        }
    }

    fn set_slot(&mut self, id: &K, score: i64, seq: u64) {
        if let Some(slot) = self.entries.get_mut(id) {
            slot.score = score;
            slot.seq = seq;
        }
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl<K, T> Default for ScoreBucketStore<K, T>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(Direction::default())
    }
}
