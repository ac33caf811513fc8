use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of committed operation a ledger entry reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Mutate,
}

/// State of a live entity just before it was mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prior<T> {
    pub score: i64,
    /// Arrival number inside the bucket at capture time.
    pub seq: u64,
    pub payload: T,
}

/// Immutable pre-operation capture of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<K, T> {
    pub id: K,
    /// `None` means the entity did not exist.
    pub prior: Option<Prior<T>>,
}

impl<K, T> Snapshot<K, T> {
    pub fn absent(id: K) -> Self {
        Self { id, prior: None }
    }

    pub fn present(id: K, prior: Prior<T>) -> Self {
        Self {
            id,
            prior: Some(prior),
        }
    }

    pub fn existed(&self) -> bool {
        self.prior.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry<K, T> {
    pub operation: Operation,
    pub snapshot: Snapshot<K, T>,
    pub recorded_at: DateTime<Utc>,
}

impl<K, T> LedgerEntry<K, T> {
    /// Entry reversing an insert: the entity did not exist before.
    pub fn insert(id: K) -> Self {
        Self {
            operation: Operation::Insert,
            snapshot: Snapshot::absent(id),
            recorded_at: Utc::now(),
        }
    }

    /// Entry reversing a mutate back to `prior`.
    pub fn mutate(id: K, prior: Prior<T>) -> Self {
        Self {
            operation: Operation::Mutate,
            snapshot: Snapshot::present(id, prior),
            recorded_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &K {
        &self.snapshot.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_entry_has_no_prior() {
        let entry: LedgerEntry<&str, u32> = LedgerEntry::insert("S1");
        assert_eq!(entry.operation, Operation::Insert);
        assert!(!entry.snapshot.existed());
        assert_eq!(entry.id(), &"S1");
    }

    #[test]
    fn test_mutate_entry_keeps_prior() {
        let prior = Prior {
            score: 5,
            seq: 2,
            payload: "old",
        };
        let entry = LedgerEntry::mutate(7u64, prior.clone());
        assert_eq!(entry.operation, Operation::Mutate);
        assert_eq!(entry.snapshot.prior, Some(prior));
    }

    #[test]
    fn test_snapshot_constructors() {
        let prior = Prior {
            score: 1,
            seq: 0,
            payload: (),
        };
        assert!(Snapshot::present("A", prior).existed());
        assert!(!Snapshot::<_, ()>::absent("A").existed());
    }

    #[test]
    fn test_operation_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Operation::Mutate).unwrap(), "\"mutate\"");
    }
}
