use crate::coverage::CoverageResult;
use crate::metrics::{MetricKind, MetricTarget};
use serde::Serialize;

/// The weakest health score among the targets that define a healthy range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub score: u8,
    pub metric: MetricKind,
}

/// Compute the health of `result` from the healthy ranges of `targets`.
///
/// Targets without a healthy range and metrics missing from `result` are skipped. Returns
/// `None` when no target contributes a score. Ties keep the earliest target.
#[must_use]
pub fn health_report(result: &CoverageResult, targets: &[MetricTarget]) -> Option<HealthReport> {
    targets
        .iter()
        .filter_map(|target| {
            let ratio = result.ratio(target.metric())?;
            let score = target.health(ratio)?;
            Some(HealthReport {
                score,
                metric: target.metric(),
            })
        })
        .reduce(|worst, next| if next.score < worst.score { next } else { worst })
}
