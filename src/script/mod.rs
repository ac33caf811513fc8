pub mod runner;
pub mod types;

pub use runner::{run_steps, RecordEngine};
pub use types::{Script, Status, Step, StepReport};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a step script from a YAML file.
pub fn load_script(path: &Path) -> Result<Script> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse script: invalid YAML in {}", path.display()))
}
