use serde::{Deserialize, Serialize};

/// The cyclomatic complexity of one method, as reported by a complexity tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodComplexity {
    /// Method name, qualified as `Class#method` when the enclosing class is known.
    pub name: String,
    pub complexity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u64>,
}

impl MethodComplexity {
    #[must_use]
    pub fn new(name: impl Into<String>, complexity: u32, lines: Option<u64>) -> Self {
        Self {
            name: name.into(),
            complexity,
            lines,
        }
    }

    /// Whether this method stays below `warn_complexity`.
    #[must_use]
    pub const fn is_simple(&self, warn_complexity: u32) -> bool {
        self.complexity < warn_complexity
    }
}
