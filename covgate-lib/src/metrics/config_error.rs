use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while binding configuration, before any report is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown metric identifier '{0}'")]
    UnknownMetric(String),

    #[error("{field} for metric {metric} must be between 0 and 100, got {value}")]
    ThresholdOutOfRange {
        metric: String,
        field: &'static str,
        value: f64,
    },

    #[error("healthy_min ({min}) for metric {metric} must not exceed healthy_max ({max})")]
    InvertedHealthyRange { metric: String, min: f64, max: f64 },

    #[error("warn_complexity must be at least 1, got {0}")]
    InvalidWarnComplexity(u32),

    #[error("invalid target '{0}', expected METRIC=THRESHOLD")]
    MalformedTarget(String),

    #[error("unable to read configuration file '{path}'")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse configuration file '{path}'")]
    Toml {
        path: Utf8PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
