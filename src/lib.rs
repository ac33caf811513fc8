//! Priority-bucketed entry store with validated, reversible mutation.
//!
//! Entries live in integer-score buckets served in a configurable
//! [`Direction`]. Every insert and mutate passes through a
//! [`ThresholdValidator`] before it is committed, and every committed change
//! is recorded in a bounded [`MutationLedger`] so it can be undone one step at
//! a time.
//!
//! ```
//! use prio_ledger::{Direction, RangeOp, ScoringEngine, ThresholdValidator};
//!
//! let validator = ThresholdValidator::new().with_threshold(RangeOp::GreaterThan(80));
//! let mut engine: ScoringEngine<&str, i64> =
//!     ScoringEngine::new(Direction::Descending, validator, Some(50));
//! let risk = |r: &i64| *r;
//!
//! engine.insert("T1", 70, &risk).unwrap();
//! let err = engine.mutate(&"T1", |r| *r = 95, &risk).unwrap_err();
//! assert!(err.is_threshold_breach());
//! assert_eq!(engine.get(&"T1").unwrap().score, 70);
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod record;
pub mod scoring;
pub mod script;
pub mod shared;
pub mod store;

pub use error::Error;
pub use ledger::{LedgerEntry, MutationLedger, Operation, Snapshot};
pub use record::Record;
pub use scoring::{
    validate_config, EngineConfig, Fixed, Mutation, RangeOp, ScoreFn, ScoreRule, ScoringEngine,
    ThresholdValidator, Undone, Verdict,
};
pub use shared::SharedEngine;
pub use store::{Direction, Entry, EntryRef, ScoreBucketStore};
