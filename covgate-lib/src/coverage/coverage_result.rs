use super::MethodComplexity;
use crate::metrics::{MetricKind, Ratio};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The name given to the aggregate result of a report.
pub const SUMMARY_NAME: &str = "TOTAL";

/// Coverage or complexity measurements for a report or for one of its files.
///
/// The root result holds the report summary and one child per file, in report order.
/// Complexity reports also list the methods of each file. Metrics the tool did not
/// compute are absent, which is distinct from a ratio of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    name: String,
    ratios: BTreeMap<MetricKind, Ratio>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_lines: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    code_lines: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    files: Vec<Self>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    methods: Vec<MethodComplexity>,
}

impl CoverageResult {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ratios: BTreeMap::new(),
            total_lines: None,
            code_lines: None,
            files: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn summary() -> Self {
        Self::new(SUMMARY_NAME)
    }

    #[must_use]
    pub fn with_ratio(mut self, metric: MetricKind, ratio: Ratio) -> Self {
        let _ = self.ratios.insert(metric, ratio);
        self
    }

    #[must_use]
    pub const fn with_lines(mut self, total_lines: Option<u64>, code_lines: Option<u64>) -> Self {
        self.total_lines = total_lines;
        self.code_lines = code_lines;
        self
    }

    /// Add a per-file result. A file with the same name replaces the earlier entry in place.
    #[must_use]
    pub fn with_file(mut self, file: Self) -> Self {
        if let Some(existing) = self.files.iter_mut().find(|f| f.name == file.name) {
            *existing = file;
        } else {
            self.files.push(file);
        }
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodComplexity) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ratio(&self, metric: MetricKind) -> Option<Ratio> {
        self.ratios.get(&metric).copied()
    }

    #[must_use]
    pub fn ratio_float(&self, metric: MetricKind) -> Option<f64> {
        self.ratio(metric).map(Ratio::as_f64)
    }

    #[must_use]
    pub fn ratio_int(&self, metric: MetricKind) -> Option<u8> {
        self.ratio(metric).map(Ratio::as_int)
    }

    /// Iterate over the metrics present in this result, in catalog order.
    pub fn ratios(&self) -> impl Iterator<Item = (MetricKind, Ratio)> + '_ {
        self.ratios.iter().map(|(kind, ratio)| (*kind, *ratio))
    }

    #[must_use]
    pub fn has_ratios(&self) -> bool {
        !self.ratios.is_empty()
    }

    #[must_use]
    pub const fn total_lines(&self) -> Option<u64> {
        self.total_lines
    }

    #[must_use]
    pub const fn code_lines(&self) -> Option<u64> {
        self.code_lines
    }

    #[must_use]
    pub fn files(&self) -> &[Self] {
        &self.files
    }

    #[must_use]
    pub fn file(&self, name: &str) -> Option<&Self> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Methods measured directly in this result, in report order.
    #[must_use]
    pub fn methods(&self) -> &[MethodComplexity] {
        &self.methods
    }

    /// The highest method complexity in this result and its files.
    #[must_use]
    pub fn max_complexity(&self) -> Option<u32> {
        self.methods
            .iter()
            .map(|m| m.complexity)
            .chain(self.files.iter().filter_map(Self::max_complexity))
            .max()
    }
}
