use super::ConfigError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A measurable quantity reported by a coverage or complexity tool.
///
/// The set is closed: supporting a new metric means adding a variant here and
/// teaching a parser where to find it. Every metric is a ratio where higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize)]
pub enum MetricKind {
    /// Percentage of all lines (including comments and blank lines) that were executed.
    #[serde(rename = "TOTAL_COVERAGE")]
    TotalCoverage,

    /// Percentage of executable lines that were executed.
    #[serde(rename = "CODE_COVERAGE")]
    CodeCoverage,

    /// Percentage of methods whose cyclomatic complexity is below the warning level.
    #[serde(rename = "COMPLEXITY_SCORE")]
    ComplexityScore,
}

impl MetricKind {
    /// The stable identifier used in configuration files and logs.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::TotalCoverage => "TOTAL_COVERAGE",
            Self::CodeCoverage => "CODE_COVERAGE",
            Self::ComplexityScore => "COMPLEXITY_SCORE",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TotalCoverage => "Total coverage",
            Self::CodeCoverage => "Code coverage",
            Self::ComplexityScore => "Complexity score",
        }
    }

    /// Look up a metric by its stable identifier.
    ///
    /// Matching is exact; identifiers are upper snake case.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MetricKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s.trim()).ok_or_else(|| ConfigError::UnknownMetric(s.trim().to_string()))
    }
}
