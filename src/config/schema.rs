use serde::{Deserialize, Serialize};

use crate::scoring::{EngineConfig, ScoreRule};

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    /// Score formula applied to record payloads
    #[serde(default)]
    pub scoring: ScoreRule,
}
