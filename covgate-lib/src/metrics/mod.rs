//! Metric catalog and threshold targets
//!
//! This module defines the vocabulary shared by the parser, the result model
//! and the evaluator.
//!
//! # Implementation Model
//!
//! - [`MetricKind`] is the closed catalog of metrics the supported coverage and
//!   complexity tools report.
//!   Each kind has a stable identifier (e.g. `CODE_COVERAGE`) used in
//!   configuration and logs, and a human display name.
//! - [`Ratio`] is a percentage guaranteed to lie in `0..=100`. Every value stored
//!   in a result goes through it, so out-of-range data cannot reach evaluation.
//! - [`MetricTarget`] is one configured rule: a metric, its unstable threshold
//!   and an optional healthy range. Targets are validated on construction and
//!   immutable afterwards; an ordered list of them forms the policy for a run.
//!
//! Configuration problems surface as [`ConfigError`] before any report is read.

mod config_error;
mod metric_kind;
mod metric_target;
mod ratio;

pub use config_error::ConfigError;
pub use metric_kind::MetricKind;
pub use metric_target::{DEFAULT_UNSTABLE_THRESHOLD, MetricTarget};
pub use ratio::Ratio;
