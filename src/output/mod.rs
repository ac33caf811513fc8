pub mod formatter;

pub use formatter::{
    format_age, format_fields, format_history, format_queue_table, format_report_line,
    format_reports, format_tsv, should_use_colors,
};
