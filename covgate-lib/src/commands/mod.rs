//! Command-line interface and orchestration for covgate
//!
//! This module implements the CLI commands and wires the coverage parser, the
//! threshold evaluator and the report generators into end-to-end workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **check**: Locate an rcov report, parse it, evaluate it against the
//!   configured targets and publish the outcome
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and target validity
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. A `check` run:
//!
//! 1. Loads the configuration and binds its targets (or takes `--target` overrides)
//! 2. Locates the report under the report directory
//! 3. Parses it into a coverage result
//! 4. Evaluates the targets in order, stopping at the first miss
//! 5. Writes the failure log, then the requested console and JSON output
//!
//! An unstable outcome makes the host exit with [`UNSTABLE_EXIT_CODE`]; every
//! other problem is returned as an error.

mod check;
mod common;
mod config;
mod host;
mod init;
mod run;
mod validate;

pub use check::{CheckArgs, UNSTABLE_EXIT_CODE, check};
pub use config::{Config, DEFAULT_CONFIG_FILE, TargetConfig};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
