#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for covgate
//!
//! This library holds all functionality for the covgate tool, which reads an rcov
//! HTML coverage report or a set of Saikuro complexity pages and decides whether
//! a build's coverage and code complexity are good enough.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`coverage`]: Report discovery and parsing into a result tree
//! - [`metrics`]: Metric kinds, ratios and configured targets
//! - [`gate`]: Ordered threshold evaluation and health scoring
//! - [`reports`]: Console and JSON output of a completed run

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod coverage;
pub mod gate;
pub mod metrics;
pub mod reports;

pub use crate::commands::{Host, run};
