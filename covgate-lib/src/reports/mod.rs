//! Output of a completed run
//!
//! A run's coverage result, targets, outcome and health are gathered into a
//! [`PublishedRecord`], the document handed to whatever keeps the build's
//! permanent record.
//!
//! # Implementation Model
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: a status line followed by a table of the summary and per-file
//!   ratios, optionally colored
//! - **JSON**: the full record as machine-readable data
//!
//! Both write to any `core::fmt::Write`, so callers decide where the text goes.

mod console;
mod json;
mod published_record;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use published_record::PublishedRecord;
