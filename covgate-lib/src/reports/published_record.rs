use crate::coverage::CoverageResult;
use crate::gate::{EvaluationOutcome, HealthReport};
use crate::metrics::MetricTarget;
use camino::Utf8PathBuf;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Everything a run produces, ready to be attached to the build record.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedRecord {
    pub generated_at: DateTime<Local>,
    pub report: Utf8PathBuf,
    pub targets: Vec<MetricTarget>,
    pub outcome: EvaluationOutcome,
    pub health: Option<HealthReport>,
    pub result: CoverageResult,
}

impl PublishedRecord {
    #[must_use]
    #[expect(clippy::missing_const_for_fn, reason = "Cannot be const due to non-const parameter types")]
    pub fn new(
        generated_at: DateTime<Local>,
        report: Utf8PathBuf,
        targets: Vec<MetricTarget>,
        outcome: EvaluationOutcome,
        health: Option<HealthReport>,
        result: CoverageResult,
    ) -> Self {
        Self {
            generated_at,
            report,
            targets,
            outcome,
            health,
            result,
        }
    }
}
