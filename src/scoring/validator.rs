use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::threshold::RangeOp;
use crate::error::{Error, Result};

/// Inclusive legal score range.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub fn contains(&self, score: i64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Outcome of validating a candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Reject(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfRange(ScoreRange),
    Breach(RangeOp),
}

/// Check a candidate score against a single breach condition.
///
/// `condition` carries both the bound and its sense: `>80` flags high
/// scores, `<=5` flags low ones.
pub fn validate(candidate: i64, condition: &RangeOp) -> Verdict {
    if condition.matches(candidate) {
        Verdict::Reject(Rejection::Breach(*condition))
    } else {
        Verdict::Allow
    }
}

/// Pure, side-effect-free gate run before any store mutation.
///
/// The range check runs first, so a score that is both illegal and past the
/// threshold is reported as a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdValidator {
    range: Option<ScoreRange>,
    threshold: Option<RangeOp>,
}

impl ThresholdValidator {
    /// Validator that allows every score.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.range = Some(ScoreRange { min, max });
        self
    }

    pub fn with_threshold(mut self, condition: RangeOp) -> Self {
        self.threshold = Some(condition);
        self
    }

    pub fn range(&self) -> Option<ScoreRange> {
        self.range
    }

    pub fn threshold(&self) -> Option<RangeOp> {
        self.threshold
    }

    pub fn validate(&self, candidate: i64) -> Verdict {
        if let Some(range) = self.range {
            if !range.contains(candidate) {
                return Verdict::Reject(Rejection::OutOfRange(range));
            }
        }
        match self.threshold {
            Some(ref condition) => validate(candidate, condition),
            None => Verdict::Allow,
        }
    }

    /// Validate and convert a rejection into the matching typed error for `id`.
    pub fn check<K: Clone + fmt::Debug>(&self, id: &K, candidate: i64) -> Result<(), K> {
        match self.validate(candidate) {
            Verdict::Allow => Ok(()),
            Verdict::Reject(Rejection::OutOfRange(range)) => {
                debug!(
                    ?id,
                    score = candidate,
                    min = range.min,
                    max = range.max,
                    "score out of range"
                );
                Err(Error::Validation {
                    id: id.clone(),
                    score: candidate,
                    min: range.min,
                    max: range.max,
                })
            }
            Verdict::Reject(Rejection::Breach(condition)) => {
                debug!(?id, score = candidate, %condition, "threshold breached");
                Err(Error::ThresholdBreach {
                    id: id.clone(),
                    score: candidate,
                    condition,
                })
            }
        }
    }
}
