use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing a coverage or complexity report.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("report '{0}' does not exist")]
    NotFound(Utf8PathBuf),

    #[error("unable to read report '{path}'")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no report table found in coverage report")]
    MissingReportTable,

    #[error("coverage report has no TOTAL summary row")]
    MissingSummary,

    #[error("coverage report has more than one TOTAL summary row")]
    DuplicateSummary,

    #[error("report summary does not contain any metric")]
    EmptySummary,

    #[error("no list of analyzed files found in complexity report")]
    MissingFileList,

    #[error("method row in '{0}' has an empty name")]
    MissingMethodName(String),

    #[error("file row at byte offset {0} has an empty name")]
    MissingFileName(usize),

    #[error("invalid {field} value '{text}' in row '{row}'")]
    InvalidNumber {
        row: String,
        field: &'static str,
        text: String,
    },

    #[error("{field} value {value} in row '{row}' is outside the range 0..=100")]
    OutOfRange {
        row: String,
        field: &'static str,
        value: f64,
    },
}
