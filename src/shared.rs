//! Thread-safe handle around [`ScoringEngine`].
//!
//! Mutating calls hold the write lock across the whole validate, commit,
//! record sequence, so no reader ever observes a half-applied operation.
//! Reads share the lock and hand back owned copies.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::scoring::{EngineConfig, Mutation, ScoreFn, ScoringEngine, Undone};
use crate::store::Entry;

/// Cheap-to-clone shared engine.
///
/// Score functions and update closures run under the write lock and must not
/// call back into the same handle.
pub struct SharedEngine<K, T> {
    inner: Arc<RwLock<ScoringEngine<K, T>>>,
}

impl<K, T> Clone for SharedEngine<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> SharedEngine<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug,
    T: Clone,
{
    pub fn new(engine: ScoringEngine<K, T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        Ok(Self::new(ScoringEngine::from_config(config)?))
    }

    pub fn insert<S>(&self, id: K, payload: T, score_fn: &S) -> Result<i64, K>
    where
        S: ScoreFn<T> + ?Sized,
    {
        self.inner.write().insert(id, payload, score_fn)
    }

    pub fn mutate<F, S>(&self, id: &K, update: F, score_fn: &S) -> Result<Mutation, K>
    where
        F: FnOnce(&mut T),
        S: ScoreFn<T> + ?Sized,
    {
        self.inner.write().mutate(id, update, score_fn)
    }

    pub fn undo(&self) -> Result<Undone<K>, K> {
        self.inner.write().undo()
    }

    pub fn dequeue(&self) -> Result<Entry<K, T>, K> {
        self.inner.write().dequeue()
    }

    pub fn remove(&self, id: &K) -> Result<Entry<K, T>, K> {
        self.inner.write().remove(id)
    }

    pub fn clear_history(&self) {
        self.inner.write().clear_history();
    }

    pub fn peek(&self) -> Result<Entry<K, T>, K> {
        self.inner.read().peek().map(|e| e.cloned())
    }

    pub fn get(&self, id: &K) -> Option<Entry<K, T>> {
        self.inner.read().get(id).map(|e| e.cloned())
    }

    pub fn query_at_or_above(&self, min: i64) -> Vec<Entry<K, T>> {
        self.inner
            .read()
            .query_at_or_above(min)
            .map(|e| e.cloned())
            .collect()
    }

    pub fn query_at_or_below(&self, max: i64) -> Vec<Entry<K, T>> {
        self.inner
            .read()
            .query_at_or_below(max)
            .map(|e| e.cloned())
            .collect()
    }

    pub fn count_by_score(&self, score: i64) -> usize {
        self.inner.read().count_by_score(score)
    }

    pub fn total_count(&self) -> usize {
        self.inner.read().total_count()
    }

    pub fn history_len(&self) -> usize {
        self.inner.read().history().len()
    }

    /// Run a read-only closure against the engine under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&ScoringEngine<K, T>) -> R) -> R {
        f(&self.inner.read())
    }
}
