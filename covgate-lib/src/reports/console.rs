use super::PublishedRecord;
use crate::Result;
use crate::coverage::CoverageResult;
use crate::gate::Status;
use crate::metrics::MetricKind;
use core::fmt::Write;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

const NAME_HEADING: &str = "Name";
const TOTAL_LINES_HEADING: &str = "Total lines";
const CODE_LINES_HEADING: &str = "Lines of code";
const MAX_COMPLEXITY_HEADING: &str = "Max complexity";

pub fn generate<W: Write>(record: &PublishedRecord, use_colors: bool, writer: &mut W) -> Result<()> {
    let status_str = record.outcome.status().to_string();
    let colored_status = if use_colors {
        match record.outcome.status() {
            Status::Ok => status_str.green().bold().to_string(),
            Status::Unstable => status_str.yellow().bold().to_string(),
        }
    } else {
        status_str
    };

    writeln!(writer, "{} is {colored_status}", record.report)?;
    if let Some(failure) = record.outcome.failure() {
        writeln!(writer, "  🗙 {failure}")?;
    }
    if let Some(health) = &record.health {
        writeln!(writer, "  Health: {}% ({})", health.score, health.metric)?;
    }
    writeln!(writer)?;

    let rows: Vec<&CoverageResult> = core::iter::once(&record.result).chain(record.result.files()).collect();
    let name_width = rows
        .iter()
        .map(|r| r.name().chars().count())
        .chain(core::iter::once(NAME_HEADING.len()))
        .max()
        .unwrap_or(0);

    // only metrics the report actually carries get a column
    let metrics: Vec<MetricKind> = MetricKind::iter()
        .filter(|&metric| rows.iter().any(|r| r.ratio(metric).is_some()))
        .collect();
    let show_complexity = rows.iter().any(|r| !r.methods().is_empty());

    let mut heading = format!(
        "{NAME_HEADING:<name_width$}  {TOTAL_LINES_HEADING:>w1$}  {CODE_LINES_HEADING:>w2$}",
        w1 = TOTAL_LINES_HEADING.len(),
        w2 = CODE_LINES_HEADING.len()
    );
    for metric in &metrics {
        let _ = write!(heading, "  {:>width$}", metric.display_name(), width = metric.display_name().len());
    }
    if show_complexity {
        let _ = write!(heading, "  {MAX_COMPLEXITY_HEADING}");
    }

    if use_colors {
        writeln!(writer, "{}", heading.bold())?;
    } else {
        writeln!(writer, "{heading}")?;
    }

    for row in rows {
        write!(
            writer,
            "{:<name_width$}  {:>w1$}  {:>w2$}",
            row.name(),
            format_count(row.total_lines()),
            format_count(row.code_lines()),
            w1 = TOTAL_LINES_HEADING.len(),
            w2 = CODE_LINES_HEADING.len()
        )?;
        for metric in &metrics {
            let value = row.ratio(*metric).map_or_else(|| "n/a".to_string(), |ratio| ratio.to_string());
            write!(writer, "  {value:>width$}", width = metric.display_name().len())?;
        }
        if show_complexity {
            let value = row.max_complexity().map_or_else(|| "n/a".to_string(), |c| c.to_string());
            write!(writer, "  {value:>width$}", width = MAX_COMPLEXITY_HEADING.len())?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn format_count(count: Option<u64>) -> String {
    count.map_or_else(|| "n/a".to_string(), |c| c.to_string())
}
