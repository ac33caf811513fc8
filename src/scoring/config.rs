use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::threshold::RangeOp;
use super::validation::validate_config;
use super::validator::{ScoreRange, ThresholdValidator};
use crate::store::Direction;

/// Undo depth used when no engine section is configured.
pub const DEFAULT_LEDGER_DEPTH: usize = 50;

/// Engine construction settings. Read once; never re-read at runtime.
///
/// Example YAML:
/// ```yaml
/// engine:
///   direction: descending
///   score_range: { min: 0, max: 100 }
///   threshold: ">80"
///   ledger_depth: 20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Which end of the score axis is served first (default: ascending)
    #[serde(default)]
    pub direction: Direction,

    /// Inclusive legal score range; scores outside it fail validation
    #[serde(default)]
    pub score_range: Option<ScoreRange>,

    /// Breach condition, e.g. ">80" for risk or "<=5" for stock levels
    #[serde(default)]
    pub threshold: Option<String>,

    /// Maximum undo history kept; unbounded when absent
    #[serde(default)]
    pub ledger_depth: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Ascending,
            score_range: None,
            threshold: None,
            ledger_depth: Some(DEFAULT_LEDGER_DEPTH),
        }
    }
}

impl EngineConfig {
    /// Build the validator described by this config.
    ///
    /// Runs [`validate_config`] first so every problem is reported at once.
    pub fn build_validator(&self) -> Result<ThresholdValidator> {
        validate_config(self).map_err(|errors| anyhow!(errors.join("; ")))?;

        let mut validator = ThresholdValidator::new();
        if let Some(range) = self.score_range {
            validator = validator.with_range(range.min, range.max);
        }
        if let Some(ref expr) = self.threshold {
            validator = validator.with_threshold(RangeOp::parse(expr)?);
        }
        Ok(validator)
    }
}

/// Weighted field sum used to score [`Record`](crate::record::Record) payloads.
///
/// `score = base + sum(weight * field)`; missing fields count as zero.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoreRule {
    #[serde(default)]
    pub base: i64,

    #[serde(default)]
    pub weights: BTreeMap<String, i64>,
}

impl Default for ScoreRule {
    fn default() -> Self {
        Self {
            base: 0,
            weights: BTreeMap::from([("priority".to_string(), 1)]),
        }
    }
}
