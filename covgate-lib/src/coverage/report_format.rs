use super::{DEFAULT_REPORT_FILE, RcovParser, ReportParser, SAIKURO_INDEX_FILE, SaikuroParser};
use crate::metrics::MetricTarget;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The tool that produced a report, which decides where it lives and how it is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// rcov line coverage summary
    #[default]
    Rcov,

    /// Saikuro cyclomatic complexity pages
    Saikuro,
}

impl ReportFormat {
    #[must_use]
    pub const fn default_report_dir(self) -> &'static str {
        match self {
            Self::Rcov => "coverage",
            Self::Saikuro => "saikuro",
        }
    }

    #[must_use]
    pub const fn default_report_file(self) -> &'static str {
        match self {
            Self::Rcov => DEFAULT_REPORT_FILE,
            Self::Saikuro => SAIKURO_INDEX_FILE,
        }
    }

    /// The targets used when a configuration does not list any.
    #[must_use]
    pub fn default_targets(self) -> Vec<MetricTarget> {
        match self {
            Self::Rcov => MetricTarget::defaults(),
            Self::Saikuro => MetricTarget::complexity_defaults(),
        }
    }

    /// A parser for this format. `warn_complexity` only affects Saikuro reports.
    #[must_use]
    pub fn parser(self, warn_complexity: u32) -> Box<dyn ReportParser> {
        match self {
            Self::Rcov => Box::new(RcovParser::new()),
            Self::Saikuro => Box::new(SaikuroParser::with_warn_complexity(warn_complexity)),
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rcov => write!(f, "rcov"),
            Self::Saikuro => write!(f, "saikuro"),
        }
    }
}
