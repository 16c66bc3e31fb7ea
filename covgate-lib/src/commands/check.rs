use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::coverage::{ReportFormat, locate_reports};
use crate::gate::{evaluate, health_report, write_failure_log};
use crate::metrics::MetricTarget;
use crate::reports::{PublishedRecord, generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::{Write, stdout};

const LOG_TARGET: &str = "     check";

/// Exit status of a run whose coverage missed a target.
pub const UNSTABLE_EXIT_CODE: i32 = 2;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to configuration file (default is `covgate.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Tool that wrote the report, overriding `report_format`
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Directory searched for the report, overriding `report_dir`
    #[arg(long, value_name = "PATH")]
    pub report_dir: Option<Utf8PathBuf>,

    /// File name of the report, overriding `report_file`
    #[arg(long, value_name = "NAME")]
    pub report_file: Option<String>,

    /// Target to check for this run instead of the configured ones (repeatable, checked in order)
    #[arg(long = "target", value_name = "METRIC=THRESHOLD")]
    pub targets: Vec<MetricTarget>,

    /// Write the coverage result and outcome to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print a summary table of the report
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Locate, parse and evaluate the coverage or complexity report, then publish the outcome.
///
/// An unstable outcome is not an error: the failure is written to the host's output and the
/// host is asked to exit with [`UNSTABLE_EXIT_CODE`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no report is found, the report cannot
/// be parsed, or a target names a metric the report does not contain.
pub fn check<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    init_logging(args.log_level);

    match check_inner(host, args, Utf8Path::new(".")) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Coverage check failed: {e}");
            Err(e)
        }
    }
}

fn check_inner<H: Host>(host: &mut H, args: &CheckArgs, base_dir: &Utf8Path) -> Result<()> {
    let mut config = Config::load(base_dir, args.config.as_ref()).into_app_err("loading covgate configuration")?;
    if let Some(format) = args.format {
        config.report_format = format;
    }

    let targets = if args.targets.is_empty() {
        config.metric_targets().into_app_err("binding targets")?
    } else {
        log::info!(target: LOG_TARGET, "Using {} target(s) from the command line", args.targets.len());
        args.targets.clone()
    };

    let report_format = config.report_format;
    let report_dir = args.report_dir.as_deref().unwrap_or_else(|| config.report_dir());
    let report_file = args.report_file.as_deref().unwrap_or_else(|| config.report_file());

    let candidates = locate_reports(report_dir, report_file).into_app_err_with(|| format!("locating {report_format} report"))?;
    let Some(report) = candidates.into_iter().next() else {
        return Err(app_err!("no {report_format} report named '{report_file}' found under '{report_dir}'"));
    };

    let result = report_format
        .parser(config.warn_complexity)
        .parse(&report)
        .into_app_err_with(|| format!("parsing {report_format} report '{report}'"))?;

    let outcome = evaluate(&result, &targets).into_app_err("evaluating targets")?;
    write_failure_log(&outcome, &mut host.output()).into_app_err("writing failure log")?;

    let health = health_report(&result, &targets);
    let record = PublishedRecord::new(Local::now(), report, targets, outcome, health, result);

    if args.console {
        let mut console_output = String::new();
        generate_console(&record, args.color.use_colors(&stdout()), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&record, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    if !outcome.is_ok() {
        host.exit(UNSTABLE_EXIT_CODE);
    }

    Ok(())
}
