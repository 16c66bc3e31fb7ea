//! Report ingestion
//!
//! This module finds coverage and complexity reports on disk and turns them
//! into [`CoverageResult`] values.
//!
//! # Implementation Model
//!
//! - [`locate_reports`] walks a directory and returns every file whose name
//!   matches the expected report file name, ignoring case. Callers use the first
//!   candidate.
//! - [`ReportFormat`] names the tool that wrote the report and hands out the
//!   matching [`ReportParser`].
//! - [`RcovParser`] reads an rcov summary page fully into memory and extracts
//!   the summary row and one child result per file row, stopping at the end of
//!   the report table. Every ratio is validated into a
//!   [`Ratio`](crate::metrics::Ratio); a value outside `0..=100` is a
//!   [`ParseError`], never clamped.
//! - [`SaikuroParser`] reads a Saikuro index page, follows its links to the
//!   per-file pages and records each method's cyclomatic complexity. Files and
//!   the summary are scored by the share of methods below the warning level.
//! - [`CoverageResult`] is built once per parse and not mutated afterwards.
//!   Metrics the tool did not report stay unset so evaluation can tell them
//!   apart from a ratio of zero.

mod coverage_result;
mod locator;
mod method_complexity;
mod page;
mod parse_error;
mod rcov_parser;
mod report_format;
mod saikuro_parser;

pub use coverage_result::{CoverageResult, SUMMARY_NAME};
pub use locator::{DEFAULT_REPORT_FILE, LocateError, locate_reports};
pub use method_complexity::MethodComplexity;
pub use parse_error::ParseError;
pub use rcov_parser::{RcovParser, ReportParser};
pub use report_format::ReportFormat;
pub use saikuro_parser::{DEFAULT_WARN_COMPLEXITY, SAIKURO_INDEX_FILE, SaikuroParser};
