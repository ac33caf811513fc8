use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scoring::{EngineConfig, ScoreRule};

/// A replayable list of engine operations.
///
/// Example YAML:
/// ```yaml
/// engine:
///   direction: descending
///   threshold: ">80"
/// scoring:
///   weights: { risk: 1 }
/// steps:
///   - insert: { id: T1, fields: { risk: 70 } }
///   - mutate: { id: T1, set: { risk: 95 } }
///   - undo
///   - query_above: 50
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Overrides the engine section of the config file
    #[serde(default)]
    pub engine: Option<EngineConfig>,

    /// Overrides the scoring section of the config file
    #[serde(default)]
    pub scoring: Option<ScoreRule>,

    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Insert {
        id: String,
        #[serde(default)]
        fields: BTreeMap<String, i64>,
    },
    Mutate {
        id: String,
        set: BTreeMap<String, i64>,
    },
    Remove(String),
    Get(String),
    Dequeue,
    Peek,
    Undo,
    QueryAbove(i64),
    QueryBelow(i64),
    Count(i64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Insert { id, .. } => write!(f, "insert {}", id),
            Step::Mutate { id, .. } => write!(f, "mutate {}", id),
            Step::Remove(id) => write!(f, "remove {}", id),
            Step::Get(id) => write!(f, "get {}", id),
            Step::Dequeue => write!(f, "dequeue"),
            Step::Peek => write!(f, "peek"),
            Step::Undo => write!(f, "undo"),
            Step::QueryAbove(min) => write!(f, "query >= {}", min),
            Step::QueryBelow(max) => write!(f, "query <= {}", max),
            Step::Count(score) => write!(f, "count {}", score),
        }
    }
}

/// How a single step ended.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    /// Threshold breach: the caller is expected to route this for review.
    Flagged,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepReport {
    pub index: usize,
    pub step: String,
    pub status: Status,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let yaml = r#"
steps:
  - insert:
      id: P1
      fields:
        priority: 2
  - mutate:
      id: P1
      set:
        priority: 1
  - remove: P1
  - query_above: 3
  - count: 2
  - dequeue
  - undo
"#;
        let script: Script = serde_saphyr::from_str(yaml).unwrap();
        assert!(script.engine.is_none());
        assert_eq!(script.steps.len(), 7);
        assert_eq!(
            script.steps[0],
            Step::Insert {
                id: "P1".to_string(),
                fields: BTreeMap::from([("priority".to_string(), 2)]),
            }
        );
        assert_eq!(script.steps[2], Step::Remove("P1".to_string()));
        assert_eq!(script.steps[3], Step::QueryAbove(3));
        assert_eq!(script.steps[5], Step::Dequeue);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::QueryBelow(4).to_string(), "query <= 4");
        assert_eq!(Step::Remove("S1".to_string()).to_string(), "remove S1");
    }

    #[test]
    fn test_report_json_shape() {
        let report = StepReport {
            index: 1,
            step: "undo".to_string(),
            status: Status::Flagged,
            detail: "x".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "flagged");
    }
}
