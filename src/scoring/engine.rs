use std::fmt;
use std::hash::Hash;

use tracing::debug;

use super::config::EngineConfig;
use super::score_fn::ScoreFn;
use super::validator::ThresholdValidator;
use crate::error::{Error, Result};
use crate::ledger::{LedgerEntry, MutationLedger, Prior};
use crate::store::{Direction, Entry, EntryRef, Query, ScoreBucketStore};

/// Score change produced by a committed mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub from: i64,
    pub to: i64,
}

impl Mutation {
    /// True if the entity changed bucket.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// What a successful undo reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undone<K> {
    /// An insert was reversed; the entity is gone.
    Insert { id: K },
    /// A mutate was reversed; payload and score are back to their prior values.
    Mutate { id: K, restored_score: i64 },
}

impl<K> Undone<K> {
    pub fn id(&self) -> &K {
        match self {
            Undone::Insert { id } | Undone::Mutate { id, .. } => id,
        }
    }
}

/// Validated, reversible front door to a [`ScoreBucketStore`].
///
/// Every insert and mutate runs validate, commit, record as one unit: a
/// rejected call leaves the store and the ledger untouched, and every
/// committed call leaves exactly one ledger entry. Dequeue and remove are
/// consumption and are never recorded.
#[derive(Debug, Clone)]
pub struct ScoringEngine<K, T> {
    store: ScoreBucketStore<K, T>,
    validator: ThresholdValidator,
    ledger: MutationLedger<K, T>,
}

impl<K, T> ScoringEngine<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new(direction: Direction, validator: ThresholdValidator, max_depth: Option<usize>) -> Self {
        Self {
            store: ScoreBucketStore::new(direction),
            validator,
            ledger: MutationLedger::new(max_depth),
        }
    }

    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        let validator = config.build_validator()?;
        Ok(Self::new(config.direction, validator, config.ledger_depth))
    }

    /// Absent -> Present. Returns the committed score.
    pub fn insert<S>(&mut self, id: K, payload: T, score_fn: &S) -> Result<i64, K>
    where
        S: ScoreFn<T> + ?Sized,
    {
        if self.store.contains(&id) {
            return Err(Error::DuplicateIdentity(id));
        }
        let score = score_fn.score(&payload);
        self.validator.check(&id, score)?;

        self.store.insert(id.clone(), score, payload)?;
        debug!(?id, score, "inserted");
        self.ledger.record(LedgerEntry::insert(id));
        Ok(score)
    }

    /// Present(s) -> Present(s').
    ///
    /// `update` runs on a working copy; the live payload is only replaced
    /// once the recomputed score passes validation. A score change re-queues
    /// the entity at the back of its new bucket.
    pub fn mutate<F, S>(&mut self, id: &K, update: F, score_fn: &S) -> Result<Mutation, K>
    where
        T: Clone,
        F: FnOnce(&mut T),
        S: ScoreFn<T> + ?Sized,
    {
        let live = self
            .store
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let from = live.score;
        let mut working = live.payload.clone();

        update(&mut working);
        let to = score_fn.score(&working);
        self.validator.check(id, to)?;

        let seq = self
            .store
            .sequence(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let payload = self.store.replace_payload(id, working)?;
        if to != from {
            self.store.move_bucket(id, from, to)?;
        }
        debug!(?id, from, to, "mutated");
        self.ledger.record(LedgerEntry::mutate(
            id.clone(),
            Prior {
                score: from,
                seq,
                payload,
            },
        ));
        Ok(Mutation { from, to })
    }

    /// Reverse the most recent committed insert or mutate.
    pub fn undo(&mut self) -> Result<Undone<K>, K> {
        let target = self.ledger.peek().ok_or(Error::UndoNotAvailable)?.id();
        if !self.store.contains(target) {
            return Err(Error::NotFound(target.clone()));
        }

        let entry = self.ledger.pop()?;
        let id = entry.snapshot.id;
        let undone = match entry.snapshot.prior {
            None => {
                self.store.remove(&id)?;
                Undone::Insert { id }
            }
            Some(prior) => {
                self.store.replace_payload(&id, prior.payload)?;
                if self.store.score_of(&id) != Some(prior.score) {
                    self.store.reposition(&id, prior.score, prior.seq)?;
                }
                Undone::Mutate {
                    id,
                    restored_score: prior.score,
                }
            }
        };
        debug!(id = ?undone.id(), remaining = self.ledger.len(), "undone");
        Ok(undone)
    }

    /// Take the highest-priority entry. Its history can no longer be undone.
    pub fn dequeue(&mut self) -> Result<Entry<K, T>, K> {
        let entry = self.store.dequeue_highest()?;
        self.ledger.forget(&entry.id);
        Ok(entry)
    }

    /// Take `id` out of the store. Its history can no longer be undone.
    pub fn remove(&mut self, id: &K) -> Result<Entry<K, T>, K> {
        let entry = self.store.remove(id)?;
        self.ledger.forget(id);
        debug!(?id, "removed");
        Ok(entry)
    }

    pub fn peek(&self) -> Result<EntryRef<'_, K, T>, K> {
        self.store.peek_highest()
    }

    pub fn get(&self, id: &K) -> Option<EntryRef<'_, K, T>> {
        self.store.get(id)
    }

    pub fn query_at_or_above(&self, min: i64) -> Query<'_, K, T> {
        self.store.query_at_or_above(min)
    }

    pub fn query_at_or_below(&self, max: i64) -> Query<'_, K, T> {
        self.store.query_at_or_below(max)
    }

    pub fn count_by_score(&self, score: i64) -> usize {
        self.store.count_by_score(score)
    }

    pub fn total_count(&self) -> usize {
        self.store.total_count()
    }

    pub fn store(&self) -> &ScoreBucketStore<K, T> {
        &self.store
    }

    pub fn validator(&self) -> &ThresholdValidator {
        &self.validator
    }

    pub fn history(&self) -> &MutationLedger<K, T> {
        &self.ledger
    }

    /// Discard all undo history.
    pub fn clear_history(&mut self) {
        self.ledger.clear();
    }
}
