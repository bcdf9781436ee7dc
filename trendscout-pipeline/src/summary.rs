//! Operator-facing table summarising a run.

use std::io::{self, Write};

use crate::{CategoryOutcome, RunReport};

/// Write one row per category: trend count, average score, top keyword and
/// status.
///
/// # Errors
/// Propagates write failures from `out`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use trendscout_pipeline::{RunReport, write_summary};
///
/// let report = RunReport {
///     date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
///     snapshot_path: "output/trends_2026-10-19.json".into(),
///     outcomes: Vec::new(),
/// };
/// let mut out = Vec::new();
/// write_summary(&report, &mut out).expect("write to memory");
/// assert!(String::from_utf8(out).expect("utf8").contains("0 trends"));
/// ```
pub fn write_summary(report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<16} {:>5} {:>6}  {:<40} Status",
        "Category", "Count", "Avg", "Top keyword"
    )?;
    for outcome in &report.outcomes {
        write_row(outcome, out)?;
    }
    writeln!(
        out,
        "{} trends written to {}",
        report.persisted(),
        report.snapshot_path
    )
}

fn write_row(outcome: &CategoryOutcome, out: &mut dyn Write) -> io::Result<()> {
    let average = outcome
        .average_score()
        .map_or_else(|| "-".to_owned(), |avg| format!("{avg:.1}"));
    writeln!(
        out,
        "{:<16} {:>5} {:>6}  {:<40} {}",
        outcome.category.as_str(),
        outcome.count(),
        average,
        outcome.top_keyword().unwrap_or("-"),
        outcome.status
    )
}
