//! Threshold evaluation of coverage results
//!
//! This module implements the quality gate that decides whether a run is OK or
//! UNSTABLE based on configured [`MetricTarget`](crate::metrics::MetricTarget)s.
//!
//! # Implementation Model
//!
//! [`evaluate`] walks the targets in their configured order and looks up each
//! target's metric in the result:
//!
//! 1. **Unset metric**: the report never computed it. This is an
//!    [`EvaluationMismatch`], a fatal configuration error rather than a missed
//!    threshold.
//! 2. **Below threshold**: the outcome is UNSTABLE and names that metric.
//!    Remaining targets are not checked, so the reported metric depends on
//!    target order.
//! 3. Otherwise the next target is checked; when all pass the outcome is OK.
//!
//! Evaluation is pure. Writing the human-readable failure message is left to
//! [`write_failure_log`], called by the host with its log sink.
//!
//! [`health_report`] is independent of the outcome: it scores the result
//! against the optional healthy ranges of the targets.

mod evaluation_outcome;
mod evaluator;
mod health;

pub use evaluation_outcome::{EvaluationMismatch, EvaluationOutcome, Status, ThresholdFailure};
pub use evaluator::{FAILURE_HEADER, ThresholdPolicy, evaluate, write_failure_log};
pub use health::{HealthReport, health_report};
