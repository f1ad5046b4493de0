use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Line classification of one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

/// Function counts per cyclomatic-complexity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub very_high: usize,
}

impl ComplexityDistribution {
    pub fn record(&mut self, complexity: u32) {
        match complexity {
            0..=5 => self.low += 1,
            6..=10 => self.medium += 1,
            11..=20 => self.high += 1,
            _ => self.very_high += 1,
        }
    }

    pub fn merge(&mut self, other: &ComplexityDistribution) {
        self.low += other.low;
        self.medium += other.medium;
        self.high += other.high;
        self.very_high += other.very_high;
    }

    pub fn high_or_worse(&self) -> usize {
        self.high + self.very_high
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexityStats {
    pub functions: usize,
    pub avg_complexity: f64,
    pub max_complexity: u32,
    pub avg_function_length: f64,
    pub distribution: ComplexityDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodeMetrics {
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub avg_file_length: f64,
    pub avg_function_length: f64,
    pub comment_ratio: f64,
    pub files_analyzed: usize,
    pub functions_count: usize,
    pub avg_complexity: f64,
    pub max_complexity: u32,
    pub complexity_distribution: ComplexityDistribution,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CadenceTrend {
    Active,
    Moderate,
    Inactive,
    #[default]
    Unknown,
}

impl CadenceTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Moderate => "moderate",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CadenceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GitMetrics {
    pub total_commits: usize,
    pub unique_authors: usize,
    pub avg_commits_per_week: f64,
    pub commit_frequency_trend: CadenceTrend,
    pub avg_commit_message_length: f64,
    pub good_commit_messages: usize,
    pub poor_commit_messages: usize,
    pub total_branches: usize,
    pub large_commits: usize,
    pub incremental_commits: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestingMetrics {
    pub has_test_directory: bool,
    pub test_files_count: usize,
    pub test_to_code_ratio: f64,
    pub has_ci_cd: bool,
    pub ci_cd_tools: Vec<String>,
    pub has_linter_config: bool,
    pub linter_tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaturityMetrics {
    pub has_package_manager: bool,
    pub package_managers: Vec<String>,
    pub has_config_example: bool,
    pub has_deployment_config: bool,
    pub deployment_tools: Vec<String>,
    pub real_world_features: BTreeMap<String, bool>,
    pub error_handling_score: f64,
}

impl MaturityMetrics {
    pub fn feature_count(&self) -> usize {
        self.real_world_features
            .values()
            .filter(|present| **present)
            .count()
    }

    pub fn present_features(&self) -> Vec<&str> {
        self.real_world_features
            .iter()
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileStructure {
    pub total_files: usize,
    pub total_code_files: usize,
    pub max_depth: usize,
    pub avg_depth: f64,
    pub directories: usize,
    pub key_files_present: BTreeMap<String, bool>,
    pub file_types: BTreeMap<String, usize>,
    pub largest_files: Vec<LargeFile>,
}

impl FileStructure {
    pub fn has_key_file(&self, category: &str) -> bool {
        self.key_files_present
            .get(category)
            .copied()
            .unwrap_or(false)
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_buckets_follow_fixed_thresholds() {
        let mut distribution = ComplexityDistribution::default();
        for complexity in [1, 5, 6, 10, 11, 20, 21, 40] {
            distribution.record(complexity);
        }
        assert_eq!(
            distribution,
            ComplexityDistribution {
                low: 2,
                medium: 2,
                high: 2,
                very_high: 2,
            }
        );
        assert_eq!(distribution.high_or_worse(), 4);
    }

    #[test]
    fn cadence_trend_serializes_lowercase() {
        let rendered = serde_json::to_string(&CadenceTrend::Inactive).expect("serialize");
        assert_eq!(rendered, "\"inactive\"");
        assert_eq!(CadenceTrend::default(), CadenceTrend::Unknown);
    }

    #[test]
    fn round_to_keeps_requested_precision() {
        assert_eq!(round_to(0.14999, 3), 0.15);
        assert_eq!(round_to(12.345678, 2), 12.35);
    }
}
