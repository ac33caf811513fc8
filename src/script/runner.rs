use tracing::info;

use super::types::{Status, Step, StepReport};
use crate::error::Error;
use crate::record::Record;
use crate::scoring::{ScoreRule, ScoringEngine, Undone};
use crate::store::EntryRef;

pub type RecordEngine = ScoringEngine<String, Record>;

/// Run every step in order. A failing step is reported and the run continues.
pub fn run_steps(engine: &mut RecordEngine, rule: &ScoreRule, steps: &[Step]) -> Vec<StepReport> {
    let reports: Vec<StepReport> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let (status, detail) = match run_step(engine, rule, step) {
                Ok(detail) => (Status::Ok, detail),
                Err(e) if e.is_threshold_breach() => (Status::Flagged, e.to_string()),
                Err(e) => (Status::Error, e.to_string()),
            };
            StepReport {
                index: i + 1,
                step: step.to_string(),
                status,
                detail,
            }
        })
        .collect();

    let flagged = reports.iter().filter(|r| r.status == Status::Flagged).count();
    info!(steps = reports.len(), flagged, remaining = engine.total_count(), "replay finished");
    reports
}

fn run_step(engine: &mut RecordEngine, rule: &ScoreRule, step: &Step) -> Result<String, Error<String>> {
    match step {
        Step::Insert { id, fields } => {
            let score = engine.insert(id.clone(), Record::new(fields.clone()), rule)?;
            Ok(format!("score {}", score))
        }
        Step::Mutate { id, set } => {
            let m = engine.mutate(id, |record| record.apply(set), rule)?;
            if m.moved() {
                Ok(format!("score {} -> {}", m.from, m.to))
            } else {
                Ok(format!("score {} (unchanged)", m.to))
            }
        }
        Step::Remove(id) => {
            let entry = engine.remove(id)?;
            Ok(format!("removed at score {}", entry.score))
        }
        Step::Get(id) => engine
            .get(id)
            .map(describe)
            .ok_or_else(|| Error::NotFound(id.clone())),
        Step::Dequeue => {
            let entry = engine.dequeue()?;
            Ok(format!("{} (score {})", entry.id, entry.score))
        }
        Step::Peek => engine.peek().map(describe),
        Step::Undo => match engine.undo()? {
            Undone::Insert { id } => Ok(format!("removed {}", id)),
            Undone::Mutate { id, restored_score } => {
                Ok(format!("restored {} to score {}", id, restored_score))
            }
        },
        Step::QueryAbove(min) => Ok(list(engine.query_at_or_above(*min))),
        Step::QueryBelow(max) => Ok(list(engine.query_at_or_below(*max))),
        Step::Count(score) => Ok(format!(
            "{} at score {} ({} total)",
            engine.count_by_score(*score),
            score,
            engine.total_count()
        )),
    }
}

fn describe(entry: EntryRef<'_, String, Record>) -> String {
    format!("{} (score {})", entry.id, entry.score)
}

fn list<'a>(entries: impl Iterator<Item = EntryRef<'a, String, Record>>) -> String {
    let ids: Vec<&str> = entries.map(|e| e.id.as_str()).collect();
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}
