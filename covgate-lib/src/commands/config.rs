use crate::coverage::{DEFAULT_WARN_COMPLEXITY, ReportFormat};
use crate::metrics::{ConfigError, MetricKind, MetricTarget};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The configuration file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "covgate.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tool that wrote the report: `rcov` (default) or `saikuro`
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Directory searched for the report; defaults depend on the report format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<Utf8PathBuf>,

    /// File name of the report, matched without regard to case; defaults depend on the report format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,

    /// Methods with a cyclomatic complexity at or above this level count against the complexity score
    #[serde(default = "default_warn_complexity")]
    pub warn_complexity: u32,

    /// Ordered targets; when absent the report format's default targets apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetConfig>>,
}

/// One `[[targets]]` entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Metric identifier, e.g. `CODE_COVERAGE`
    pub metric: String,

    /// Ratios strictly below this value mark the run as unstable (0..100)
    pub unstable: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_max: Option<f64>,
}

impl TargetConfig {
    fn bind(&self) -> Result<MetricTarget, ConfigError> {
        let metric: MetricKind = self.metric.parse()?;
        MetricTarget::new(metric, self.unstable, self.healthy_min, self.healthy_max)
    }
}

const fn default_warn_complexity() -> u32 {
    DEFAULT_WARN_COMPLEXITY
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `covgate.toml` in `base_dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a target is invalid
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self, ConfigError> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.clone(), source })?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(source) => return Err(ConfigError::Io { path, source }),
            }
        };

        Self::from_toml(&final_path, &text)
    }

    /// Parse and validate configuration text. `path` is only used to describe errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, has unknown keys, or holds an invalid target
    pub fn from_toml(path: &Utf8Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        if config.warn_complexity == 0 {
            return Err(ConfigError::InvalidWarnComplexity(config.warn_complexity));
        }
        let _ = config.metric_targets()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<(), ConfigError> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).map_err(|source| ConfigError::Io {
            path: output_path.to_path_buf(),
            source,
        })
    }

    /// The directory searched for the report
    #[must_use]
    pub fn report_dir(&self) -> &Utf8Path {
        self.report_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(self.report_format.default_report_dir()))
    }

    /// The report file name to look for
    #[must_use]
    pub fn report_file(&self) -> &str {
        self.report_file
            .as_deref()
            .unwrap_or_else(|| self.report_format.default_report_file())
    }

    /// Bind the configured targets, in order, falling back to the report format's default targets
    ///
    /// # Errors
    ///
    /// Returns an error for the first target with an unknown metric or out-of-range threshold
    pub fn metric_targets(&self) -> Result<Vec<MetricTarget>, ConfigError> {
        self.targets.as_ref().map_or_else(
            || Ok(self.report_format.default_targets()),
            |targets| targets.iter().map(TargetConfig::bind).collect(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
