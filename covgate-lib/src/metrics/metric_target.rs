use super::{ConfigError, MetricKind, Ratio};
use core::str::FromStr;
use serde::Serialize;

/// The out-of-the-box unstable threshold for every default target.
pub const DEFAULT_UNSTABLE_THRESHOLD: f64 = 80.0;

/// A configured threshold for one metric.
///
/// A metric whose ratio is strictly below `unstable` marks the run as unstable. The optional
/// healthy range only feeds the health score and never affects the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTarget {
    metric: MetricKind,
    unstable: f64,
    healthy_min: Option<f64>,
    healthy_max: Option<f64>,
}

impl MetricTarget {
    /// Create a validated target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThresholdOutOfRange`] if any threshold is outside `0..=100`, and
    /// [`ConfigError::InvertedHealthyRange`] if `healthy_min` exceeds `healthy_max`.
    pub fn new(metric: MetricKind, unstable: f64, healthy_min: Option<f64>, healthy_max: Option<f64>) -> Result<Self, ConfigError> {
        check_range(metric, "unstable", unstable)?;
        if let Some(min) = healthy_min {
            check_range(metric, "healthy_min", min)?;
        }
        if let Some(max) = healthy_max {
            check_range(metric, "healthy_max", max)?;
        }

        if let (Some(min), Some(max)) = (healthy_min, healthy_max)
            && min > max
        {
            return Err(ConfigError::InvertedHealthyRange {
                metric: metric.id().to_string(),
                min,
                max,
            });
        }

        Ok(Self {
            metric,
            unstable,
            healthy_min,
            healthy_max,
        })
    }

    /// The policy used when nothing is configured: total and code coverage, both at 80%.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::unchecked(MetricKind::TotalCoverage, DEFAULT_UNSTABLE_THRESHOLD),
            Self::unchecked(MetricKind::CodeCoverage, DEFAULT_UNSTABLE_THRESHOLD),
        ]
    }

    /// The policy used for complexity reports when nothing is configured: a complexity score of 80%.
    #[must_use]
    pub fn complexity_defaults() -> Vec<Self> {
        vec![Self::unchecked(MetricKind::ComplexityScore, DEFAULT_UNSTABLE_THRESHOLD)]
    }

    const fn unchecked(metric: MetricKind, unstable: f64) -> Self {
        Self {
            metric,
            unstable,
            healthy_min: None,
            healthy_max: None,
        }
    }

    #[must_use]
    pub const fn metric(&self) -> MetricKind {
        self.metric
    }

    #[must_use]
    pub const fn unstable(&self) -> f64 {
        self.unstable
    }

    #[must_use]
    pub const fn healthy_min(&self) -> Option<f64> {
        self.healthy_min
    }

    #[must_use]
    pub const fn healthy_max(&self) -> Option<f64> {
        self.healthy_max
    }

    /// Whether `ratio` misses this target. The comparison is strict: a ratio equal to the
    /// threshold passes.
    #[must_use]
    pub fn is_missed_by(&self, ratio: Ratio) -> bool {
        ratio.as_f64() < self.unstable
    }

    /// Health score in `0..=100` for `ratio`, or `None` when no healthy bound is configured.
    ///
    /// At or above `healthy_max` the score is 100, at or below `healthy_min` it is 0, and it is
    /// interpolated linearly in between. A lone bound acts as a step at that bound.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "score is clamped to 0..=100 before the cast"
    )]
    pub fn health(&self, ratio: Ratio) -> Option<u8> {
        let value = ratio.as_f64();
        let score = match (self.healthy_min, self.healthy_max) {
            (None, None) => return None,
            (Some(min), None) => {
                if value <= min {
                    0.0
                } else {
                    100.0
                }
            }
            (None, Some(max)) => {
                if value >= max {
                    100.0
                } else {
                    0.0
                }
            }
            (Some(min), Some(max)) => {
                if value >= max {
                    100.0
                } else if value <= min {
                    0.0
                } else {
                    (value - min) / (max - min) * 100.0
                }
            }
        };

        Some(score.clamp(0.0, 100.0) as u8)
    }
}

fn check_range(metric: MetricKind, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if Ratio::is_valid(value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            metric: metric.id().to_string(),
            field,
            value,
        })
    }
}

/// Parses the command-line override syntax `METRIC=THRESHOLD`, e.g. `CODE_COVERAGE=75`.
impl FromStr for MetricTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, threshold) = s.split_once('=').ok_or_else(|| ConfigError::MalformedTarget(s.to_string()))?;
        let metric: MetricKind = id.parse()?;
        let unstable = threshold
            .trim()
            .parse::<f64>()
            .map_err(|_parse_err| ConfigError::MalformedTarget(s.to_string()))?;

        Self::new(metric, unstable, None, None)
    }
}
