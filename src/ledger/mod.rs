//! Undo history for committed inserts and mutations.

pub mod stack;
pub mod types;

pub use stack::MutationLedger;
pub use types::{LedgerEntry, Operation, Prior, Snapshot};
