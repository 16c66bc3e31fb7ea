//! Threshold evaluation for coverage results
//!
//! Targets are checked in their configured order and evaluation stops at the first
//! failing target, so an unstable outcome reports a single metric even when several
//! are below their thresholds.

use super::{EvaluationMismatch, EvaluationOutcome, ThresholdFailure};
use crate::coverage::CoverageResult;
use crate::metrics::MetricTarget;
use std::io::{self, Write};

const LOG_TARGET: &str = "      gate";

/// The first line written to the build log for an unstable outcome.
pub const FAILURE_HEADER: &str = "Code coverage enforcement failed for the following metrics:";

/// Evaluate `result` against `targets`, in order.
///
/// # Evaluation order:
/// 1. Look up the target's metric in the result; an unset metric is a mismatch and stops evaluation
/// 2. If the ratio is strictly below the target's unstable threshold, the outcome is UNSTABLE
///    and no further targets are examined
/// 3. If no target fails, the outcome is OK
///
/// # Errors
///
/// Returns [`EvaluationMismatch`] if a target refers to a metric absent from `result`.
pub fn evaluate(result: &CoverageResult, targets: &[MetricTarget]) -> Result<EvaluationOutcome, EvaluationMismatch> {
    for target in targets {
        let metric = target.metric();
        let ratio = result.ratio(metric).ok_or(EvaluationMismatch { metric })?;

        if target.is_missed_by(ratio) {
            return Ok(EvaluationOutcome::unstable(ThresholdFailure {
                metric,
                ratio,
                unstable: target.unstable(),
            }));
        }
    }

    Ok(EvaluationOutcome::ok())
}

/// An ordered list of targets evaluated as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPolicy {
    targets: Vec<MetricTarget>,
}

impl ThresholdPolicy {
    #[must_use]
    pub const fn new(targets: Vec<MetricTarget>) -> Self {
        Self { targets }
    }

    #[must_use]
    pub fn targets(&self) -> &[MetricTarget] {
        &self.targets
    }

    /// # Errors
    ///
    /// Returns [`EvaluationMismatch`] if a target refers to a metric absent from `result`.
    pub fn evaluate(&self, result: &CoverageResult) -> Result<EvaluationOutcome, EvaluationMismatch> {
        evaluate(result, &self.targets)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(MetricTarget::defaults())
    }
}

/// Write the failure message of an unstable outcome to `sink`. OK outcomes write nothing.
///
/// # Errors
///
/// Returns any I/O error raised by `sink`.
pub fn write_failure_log<W: Write>(outcome: &EvaluationOutcome, sink: &mut W) -> io::Result<()> {
    if let Some(failure) = outcome.failure() {
        log::warn!(target: LOG_TARGET, "Coverage target missed: {failure}");
        writeln!(sink, "{FAILURE_HEADER}")?;
        writeln!(sink, "    {failure}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Status;
    use crate::metrics::{MetricKind, Ratio};

    fn result(total: Option<f64>, code: Option<f64>) -> CoverageResult {
        let mut result = CoverageResult::summary();
        if let Some(total) = total {
            result = result.with_ratio(MetricKind::TotalCoverage, Ratio::new(total).unwrap());
        }
        if let Some(code) = code {
            result = result.with_ratio(MetricKind::CodeCoverage, Ratio::new(code).unwrap());
        }
        result
    }

    fn target(metric: MetricKind, unstable: f64) -> MetricTarget {
        MetricTarget::new(metric, unstable, None, None).unwrap()
    }

    #[test]
    fn test_all_targets_met() {
        let outcome = evaluate(&result(Some(92.5), Some(81.0)), &MetricTarget::defaults()).unwrap();
        assert_eq!(outcome.status(), Status::Ok);
        assert_eq!(outcome.failing_metric(), None);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_threshold_is_strict() {
        let outcome = evaluate(&result(Some(80.0), Some(80.0)), &MetricTarget::defaults()).unwrap();
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_first_failing_target_in_order_is_reported() {
        let targets = vec![
            target(MetricKind::TotalCoverage, 90.0),
            target(MetricKind::CodeCoverage, 50.0),
        ];
        let outcome = evaluate(&result(Some(85.0), Some(85.0)), &targets).unwrap();
        assert_eq!(outcome.status(), Status::Unstable);
        assert_eq!(outcome.failing_metric(), Some(MetricKind::TotalCoverage));
    }

    #[test]
    fn test_only_one_failure_is_reported() {
        let outcome = evaluate(&result(Some(10.0), Some(10.0)), &MetricTarget::defaults()).unwrap();
        assert_eq!(outcome.failing_metric(), Some(MetricKind::TotalCoverage));

        let reversed: Vec<_> = MetricTarget::defaults().into_iter().rev().collect();
        let outcome = evaluate(&result(Some(10.0), Some(10.0)), &reversed).unwrap();
        assert_eq!(outcome.failing_metric(), Some(MetricKind::CodeCoverage));
    }

    #[test]
    fn test_failure_details() {
        let outcome = evaluate(&result(Some(92.5), Some(78.0)), &MetricTarget::defaults()).unwrap();
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.metric, MetricKind::CodeCoverage);
        assert_eq!(failure.ratio.as_f64(), 78.0);
        assert_eq!(failure.unstable, 80.0);
    }

    #[test]
    fn test_unset_metric_is_mismatch() {
        let err = evaluate(&result(Some(92.5), None), &MetricTarget::defaults()).unwrap_err();
        assert_eq!(err, EvaluationMismatch { metric: MetricKind::CodeCoverage });
    }

    #[test]
    fn test_mismatch_not_reached_after_failure() {
        // evaluation stops at the failing target before looking at the unset metric
        let outcome = evaluate(&result(Some(10.0), None), &MetricTarget::defaults()).unwrap();
        assert_eq!(outcome.failing_metric(), Some(MetricKind::TotalCoverage));
    }

    #[test]
    fn test_zero_ratio_is_not_a_mismatch() {
        let targets = vec![target(MetricKind::CodeCoverage, 0.0)];
        let outcome = evaluate(&result(None, Some(0.0)), &targets).unwrap();
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_no_targets_is_ok() {
        let outcome = evaluate(&result(None, None), &[]).unwrap();
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_default_policy_matches_explicit_defaults() {
        let explicit = ThresholdPolicy::new(vec![
            target(MetricKind::TotalCoverage, 80.0),
            target(MetricKind::CodeCoverage, 80.0),
        ]);
        let default = ThresholdPolicy::default();
        assert_eq!(default, explicit);

        for (total, code) in [(92.5, 78.0), (50.0, 95.0), (80.0, 80.0), (100.0, 100.0)] {
            let r = result(Some(total), Some(code));
            assert_eq!(default.evaluate(&r).unwrap(), explicit.evaluate(&r).unwrap());
        }
    }

    #[test]
    fn test_evaluate_does_not_modify_inputs() {
        let r = result(Some(92.5), Some(78.0));
        let targets = MetricTarget::defaults();
        let before = (r.clone(), targets.clone());
        let first = evaluate(&r, &targets).unwrap();
        let second = evaluate(&r, &targets).unwrap();
        assert_eq!(first, second);
        assert_eq!((r, targets), before);
    }

    #[test]
    fn test_failure_log_for_unstable() {
        let outcome = evaluate(&result(Some(92.5), Some(78.0)), &MetricTarget::defaults()).unwrap();
        let mut sink = Vec::new();
        write_failure_log(&outcome, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        insta::assert_snapshot!(text, @r"
        Code coverage enforcement failed for the following metrics:
            CODE_COVERAGE (Code coverage): 78.0% is below the unstable threshold of 80.0%
        ");
    }

    #[test]
    fn test_failure_log_for_ok_is_empty() {
        let mut sink = Vec::new();
        write_failure_log(&EvaluationOutcome::ok(), &mut sink).unwrap();
        assert!(sink.is_empty());
    }
}
