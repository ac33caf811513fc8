//! Score-bucketed entry storage.
//!
//! Entries are grouped by integer score. Buckets are served in the configured
//! [`Direction`]; inside a bucket entries are strictly first-in first-out.

pub mod bucket;
pub mod query;

pub use bucket::{Direction, Entry, EntryRef, ScoreBucketStore};
pub use query::Query;
