use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreFn, ScoreRule};

/// Generic named-integer payload used by the command line driver.
///
/// Fields are whatever the caller's domain needs: `risk`, `on_hand`,
/// `triage`, `points`. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, i64>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, i64>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> i64 {
        self.fields.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.fields.insert(name.into(), value);
    }

    /// Overwrite every field present in `changes`.
    pub fn apply(&mut self, changes: &BTreeMap<String, i64>) {
        for (name, value) in changes {
            self.fields.insert(name.clone(), *value);
        }
    }

    pub fn fields(&self) -> &BTreeMap<String, i64> {
        &self.fields
    }
}

impl<const N: usize> From<[(&str, i64); N]> for Record {
    fn from(pairs: [(&str, i64); N]) -> Self {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

impl ScoreFn<Record> for ScoreRule {
    fn score(&self, record: &Record) -> i64 {
        self.weights.iter().fold(self.base, |acc, (name, weight)| {
            acc.saturating_add(weight.saturating_mul(record.get(name)))
        })
    }
}
