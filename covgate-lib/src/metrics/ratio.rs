use core::fmt;
use serde::{Deserialize, Serialize};

/// A percentage in the closed range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ratio(f64);

impl Ratio {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Returns `None` when the value is not finite or falls outside `0..=100`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        Self::is_valid(value).then_some(Self(value))
    }

    #[must_use]
    pub fn is_valid(value: f64) -> bool {
        value.is_finite() && (Self::MIN..=Self::MAX).contains(&value)
    }

    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// The integer percentage, truncated toward zero.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is known to be within 0..=100"
    )]
    pub const fn as_int(self) -> u8 {
        self.0 as u8
    }
}

impl TryFrom<f64> for Ratio {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("ratio {value} is outside the range 0..=100"))
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
