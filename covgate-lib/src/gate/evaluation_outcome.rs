use crate::metrics::{MetricKind, Ratio};
use core::fmt;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    Unstable,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Unstable => f.write_str("UNSTABLE"),
        }
    }
}

/// The metric that caused a run to be marked unstable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdFailure {
    pub metric: MetricKind,
    pub ratio: Ratio,
    pub unstable: f64,
}

impl fmt::Display for ThresholdFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} is below the unstable threshold of {:.1}%",
            self.metric,
            self.metric.display_name(),
            self.ratio,
            self.unstable
        )
    }
}

/// The result of checking a coverage result against its targets.
///
/// An unstable outcome always names exactly one failing metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<ThresholdFailure>,
}

impl EvaluationOutcome {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            failure: None,
        }
    }

    #[must_use]
    pub const fn unstable(failure: ThresholdFailure) -> Self {
        Self {
            status: Status::Unstable,
            failure: Some(failure),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&ThresholdFailure> {
        self.failure.as_ref()
    }

    #[must_use]
    pub fn failing_metric(&self) -> Option<MetricKind> {
        self.failure.map(|f| f.metric)
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok)
    }
}

/// A target names a metric that the report never computed.
///
/// This is a configuration or tooling inconsistency, not a coverage regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target metric {metric} ({}) is not present in the report", metric.display_name())]
pub struct EvaluationMismatch {
    pub metric: MetricKind,
}
