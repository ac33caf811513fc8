use super::config::EngineConfig;
use super::threshold::RangeOp;

/// Validate engine configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(range) = config.score_range {
        if range.min > range.max {
            errors.push(format!(
                "engine.score_range: min ({}) exceeds max ({})",
                range.min, range.max
            ));
        }
    }

    if let Some(ref expr) = config.threshold {
        if let Err(e) = RangeOp::parse(expr) {
            errors.push(format!("engine.threshold: invalid '{}' - {}", expr, e));
        }
    }

    if config.ledger_depth == Some(0) {
        errors.push("engine.ledger_depth: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
