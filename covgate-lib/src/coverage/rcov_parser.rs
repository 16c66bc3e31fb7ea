use super::page::{decode_entities, read_page, table_body};
use super::{CoverageResult, ParseError};
use crate::metrics::{MetricKind, Ratio};
use camino::Utf8Path;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const LOG_TARGET: &str = "    parser";

static REPORT_TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<table\b[^>]*\bclass\s*=\s*['"]report['"][^>]*>"#).expect("invalid regex"));

// A row head is a `<tr>` whose first cell holds either the summary marker or a file link.
// Rows of the nested bar-graph tables start with other content and never match.
static ROW_HEAD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<tr\b[^>]*>\s*<td\b[^>]*>\s*(?:(?P<total>TOTAL)|<a\b[^>]*>(?P<name>[^<]*)</a>)\s*</td>").expect("invalid regex")
});

static LINES_TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<td\b[^>]*\bclass\s*=\s*['"]lines_total['"][^>]*>\s*<tt\b[^>]*>(?P<value>[^<]*)</tt>"#).expect("invalid regex"));

static LINES_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<td\b[^>]*\bclass\s*=\s*['"]lines_code['"][^>]*>\s*<tt\b[^>]*>(?P<value>[^<]*)</tt>"#).expect("invalid regex"));

static COVERAGE_TOTAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<tt\b[^>]*\bclass\s*=\s*['"]coverage_total['"][^>]*>(?P<value>[^<]*)</tt>"#).expect("invalid regex"));

static COVERAGE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<tt\b[^>]*\bclass\s*=\s*['"]coverage_code['"][^>]*>(?P<value>[^<]*)</tt>"#).expect("invalid regex"));

static PERCENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(-?\d+(?:\.\d+)?)\s*%$").expect("invalid regex"));

/// Turns a tool-specific report into a [`CoverageResult`].
pub trait ReportParser {
    /// Read and parse the report at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the report (or a page it links to) is missing, unreadable, or malformed.
    fn parse(&self, path: &Utf8Path) -> Result<CoverageResult, ParseError>;
}

/// Parser for the `index.html` summary page produced by rcov.
///
/// The page holds a table with class `report`. Its `TOTAL` row carries the aggregate
/// ratios and every other row links to one source file:
///
/// ```html
/// <tr class='total'><td>TOTAL</td><td class='lines_total'><tt>120</tt></td>
///   <td class='lines_code'><tt>80</tt></td>
///   <td><tt class='coverage_total'>92.5%</tt></td><td><tt class='coverage_code'>78.0%</tt></td></tr>
/// <tr><td><a href='lib-foo_rb.html'>lib/foo.rb</a></td>...</tr>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RcovParser;

impl RcovParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse report text that has already been read into memory.
    ///
    /// When two file rows share a name, the later row replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text does not follow the report layout or holds
    /// a ratio outside `0..=100`.
    pub fn parse_str(&self, text: &str) -> Result<CoverageResult, ParseError> {
        let table = REPORT_TABLE_REGEX.find(text).ok_or(ParseError::MissingReportTable)?;
        let body = table_body(text, table.end());

        let heads: Vec<Captures<'_>> = ROW_HEAD_REGEX.captures_iter(body).collect();

        let mut summary: Option<CoverageResult> = None;
        let mut files: Vec<CoverageResult> = Vec::new();

        for (index, head) in heads.iter().enumerate() {
            let Some(whole) = head.get(0) else {
                continue;
            };
            let row_end = heads.get(index + 1).and_then(|next| next.get(0)).map_or(body.len(), |m| m.start());
            let row = body.get(whole.end()..row_end).unwrap_or_default();

            if head.name("total").is_some() {
                if summary.is_some() {
                    return Err(ParseError::DuplicateSummary);
                }

                let result = parse_row(CoverageResult::summary(), row)?;
                if !result.has_ratios() {
                    return Err(ParseError::EmptySummary);
                }

                summary = Some(result);
            } else if let Some(name) = head.name("name") {
                let name = decode_entities(name.as_str().trim());
                if name.is_empty() {
                    return Err(ParseError::MissingFileName(table.end() + whole.start()));
                }

                if files.iter().any(|f| f.name() == name) {
                    log::warn!(target: LOG_TARGET, "File '{name}' appears more than once in the report, keeping the last row");
                }

                files.push(parse_row(CoverageResult::new(name), row)?);
            }
        }

        let summary = summary.ok_or(ParseError::MissingSummary)?;
        log::debug!(target: LOG_TARGET, "Parsed summary and {} file row(s)", files.len());

        Ok(files.into_iter().fold(summary, CoverageResult::with_file))
    }
}

impl ReportParser for RcovParser {
    fn parse(&self, path: &Utf8Path) -> Result<CoverageResult, ParseError> {
        log::info!(target: LOG_TARGET, "Parsing rcov report '{path}'");

        self.parse_str(&read_page(path)?)
    }
}

/// Extract the line counts and ratios of one row into `result`.
fn parse_row(mut result: CoverageResult, row: &str) -> Result<CoverageResult, ParseError> {
    let total_lines = capture_value(&LINES_TOTAL_REGEX, row)
        .map(|text| parse_count(result.name(), "total lines", text))
        .transpose()?;
    let code_lines = capture_value(&LINES_CODE_REGEX, row)
        .map(|text| parse_count(result.name(), "code lines", text))
        .transpose()?;
    result = result.with_lines(total_lines, code_lines);

    for (metric, regex) in [
        (MetricKind::TotalCoverage, &*COVERAGE_TOTAL_REGEX),
        (MetricKind::CodeCoverage, &*COVERAGE_CODE_REGEX),
    ] {
        if let Some(text) = capture_value(regex, row) {
            let ratio = parse_percentage(result.name(), metric, text)?;
            result = result.with_ratio(metric, ratio);
        }
    }

    Ok(result)
}

fn capture_value<'a>(regex: &Regex, row: &'a str) -> Option<&'a str> {
    regex.captures(row).and_then(|c| c.name("value")).map(|m| m.as_str().trim())
}

fn parse_count(row: &str, field: &'static str, text: &str) -> Result<u64, ParseError> {
    text.parse::<u64>().map_err(|_parse_err| ParseError::InvalidNumber {
        row: row.to_string(),
        field,
        text: text.to_string(),
    })
}

/// Parse `NN%` or `NN.NN%` into a ratio, rejecting values outside `0..=100`.
fn parse_percentage(row: &str, metric: MetricKind, text: &str) -> Result<Ratio, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        row: row.to_string(),
        field: metric.id(),
        text: text.to_string(),
    };

    let digits = PERCENT_REGEX
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(invalid)?
        .as_str();
    let value = digits.parse::<f64>().map_err(|_parse_err| invalid())?;

    Ratio::new(value).ok_or_else(|| ParseError::OutOfRange {
        row: row.to_string(),
        field: metric.id(),
        value,
    })
}
