use std::io::IsTerminal;

use chrono::{Duration, Utc};
use owo_colors::OwoColorize;

use crate::ledger::{MutationLedger, Operation};
use crate::record::Record;
use crate::script::{Status, StepReport};
use crate::store::{EntryRef, ScoreBucketStore};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format one replay step
/// Format: " 3. mutate T1  FLAGGED  score 95 for T1 breaches threshold '>80'"
pub fn format_report_line(report: &StepReport, use_colors: bool) -> String {
    let index_str = format!("{:>3}.", report.index);
    let label = match report.status {
        Status::Ok => "ok",
        Status::Flagged => "FLAGGED",
        Status::Error => "error",
    };
    let label_padded = format!("{:<7}", label);

    if use_colors {
        let label_colored = match report.status {
            Status::Ok => label_padded.green().to_string(),
            Status::Flagged => label_padded.yellow().bold().to_string(),
            Status::Error => label_padded.red().to_string(),
        };
        format!(
            "{} {:<20}  {}  {}",
            index_str.dimmed(),
            report.step,
            label_colored,
            report.detail
        )
    } else {
        format!(
            "{} {:<20}  {}  {}",
            index_str, report.step, label_padded, report.detail
        )
    }
}

pub fn format_reports(reports: &[StepReport], use_colors: bool) -> String {
    reports
        .iter()
        .map(|r| format_report_line(r, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render record fields as "name=value" pairs
pub fn format_fields(record: &Record) -> String {
    record
        .fields()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the queue in dequeue order with columns: Index, Score, Id, Fields
/// Score column is right-aligned, 7 chars wide
pub fn format_queue_table(store: &ScoreBucketStore<String, Record>, use_colors: bool) -> String {
    if store.is_empty() {
        return "Queue is empty.".to_string();
    }

    store
        .iter()
        .enumerate()
        .map(|(idx, entry)| format_queue_row(idx, &entry, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_queue_row(idx: usize, entry: &EntryRef<'_, String, Record>, use_colors: bool) -> String {
    let index_str = format!("{:>2}.", idx + 1);
    let score_padded = format!("{:>7}", entry.score);
    let fields = format_fields(entry.payload);

    if use_colors {
        format!(
            "{} {}  {}  {}",
            index_str.dimmed(),
            score_padded.bold(),
            entry.id.cyan(),
            fields.dimmed()
        )
    } else {
        format!("{} {}  {}  {}", index_str, score_padded, entry.id, fields)
    }
}

/// Format the queue as tab-separated values for scripting
/// Columns: score, id (no headers, no colors)
pub fn format_tsv(store: &ScoreBucketStore<String, Record>) -> String {
    store
        .iter()
        .map(|entry| format!("{}\t{}", entry.score, entry.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format undo history, newest first
pub fn format_history(ledger: &MutationLedger<String, Record>, use_colors: bool) -> String {
    if ledger.is_empty() {
        return "No undo history.".to_string();
    }

    let now = Utc::now();
    ledger
        .iter()
        .map(|entry| {
            let age = format_age(now - entry.recorded_at);
            let what = match (&entry.operation, &entry.snapshot.prior) {
                (Operation::Mutate, Some(prior)) => {
                    format!("mutate {} (was score {})", entry.id(), prior.score)
                }
                _ => format!("insert {}", entry.id()),
            };
            if use_colors {
                format!("{:>5}  {}", age.dimmed(), what)
            } else {
                format!("{:>5}  {}", age, what)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
