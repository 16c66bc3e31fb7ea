use super::Host;
use super::config::Config;
use crate::Result;
use crate::metrics::MetricTarget;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `covgate.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Validates a configuration file by loading it and binding its targets
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, or if a target is invalid
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Config, Vec<MetricTarget>)> {
    let config = Config::load(base_dir, config_path).into_app_err("loading covgate configuration")?;
    let targets = config.metric_targets().into_app_err("binding targets")?;
    Ok((config, targets))
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base_dir, config_path) {
        Ok((config, targets)) => {
            let mut output = host.output();
            let _ = writeln!(output, "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(output, "Config file: {path}");
            } else {
                let _ = writeln!(output, "Using {} or the default configuration", super::config::DEFAULT_CONFIG_FILE);
            }

            let _ = writeln!(
                output,
                "Report: {} named '{}' under '{}'",
                config.report_format,
                config.report_file(),
                config.report_dir()
            );
            if targets.is_empty() {
                let _ = writeln!(output, "  No targets, every report passes");
            }
            for target in &targets {
                let _ = writeln!(output, "  {} < {:.1}% is unstable", target.metric(), target.unstable());
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
