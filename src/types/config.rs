use crate::error::MirrorError;
use crate::scan::catalog::EXCLUDED_DIRS;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MirrorConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    pub scoring: Option<ScoringConfig>,
    pub confidence: Option<ConfidenceConfig>,
    pub scan: Option<ScanConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: Option<HashMap<String, f64>>,
    pub advanced_min: Option<f64>,
    pub intermediate_min: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceConfig {
    pub high: Option<ConfidenceLevelConfig>,
    pub medium: Option<ConfidenceLevelConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceLevelConfig {
    pub min_files: Option<usize>,
    pub min_commits: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub excluded_dirs: Vec<String>,
    pub error_sample_limit: Option<usize>,
}

const WEIGHT_KEYS: [&str; 6] = [
    "code_quality",
    "structure_modularity",
    "documentation",
    "testing_maintainability",
    "git_practices",
    "real_world_readiness",
];

/// Per-dimension weights. They must sum to 1.0 for the overall score to stay within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights {
    pub code_quality: f64,
    pub structure_modularity: f64,
    pub documentation: f64,
    pub testing_maintainability: f64,
    pub git_practices: f64,
    pub real_world_readiness: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            code_quality: 0.30,
            structure_modularity: 0.20,
            documentation: 0.15,
            testing_maintainability: 0.15,
            git_practices: 0.10,
            real_world_readiness: 0.10,
        }
    }
}

impl DimensionWeights {
    fn from_map(weights: &HashMap<String, f64>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: f64| *weights.get(key).unwrap_or(&fallback);
        Self {
            code_quality: pick("code_quality", defaults.code_quality),
            structure_modularity: pick("structure_modularity", defaults.structure_modularity),
            documentation: pick("documentation", defaults.documentation),
            testing_maintainability: pick(
                "testing_maintainability",
                defaults.testing_maintainability,
            ),
            git_practices: pick("git_practices", defaults.git_practices),
            real_world_readiness: pick("real_world_readiness", defaults.real_world_readiness),
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [
            self.code_quality,
            self.structure_modularity,
            self.documentation,
            self.testing_maintainability,
            self.git_practices,
            self.real_world_readiness,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub advanced_min: f64,
    pub intermediate_min: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            advanced_min: 80.0,
            intermediate_min: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceLevel {
    pub min_files: usize,
    pub min_commits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    pub high: ConfidenceLevel,
    pub medium: ConfidenceLevel,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: ConfidenceLevel {
                min_files: 10,
                min_commits: 5,
            },
            medium: ConfidenceLevel {
                min_files: 3,
                min_commits: 2,
            },
        }
    }
}

pub const DEFAULT_ERROR_SAMPLE_LIMIT: usize = 100;

/// Immutable analysis settings, resolved once from the merged config and CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_name: Option<String>,
    pub language: Option<String>,
    pub weights: DimensionWeights,
    pub tiers: TierThresholds,
    pub confidence: ConfidenceThresholds,
    pub excluded_dirs: BTreeSet<String>,
    pub error_sample_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

impl Settings {
    pub fn resolve(config: Option<&MirrorConfig>, language: Option<&str>) -> Self {
        let language = language
            .map(str::to_string)
            .or_else(|| config.and_then(|cfg| cfg.project.language.clone()))
            .filter(|language| !language.trim().is_empty());

        let scoring = config.and_then(|cfg| cfg.scoring.as_ref());
        let weights = scoring
            .and_then(|scoring| scoring.weights.as_ref())
            .map(DimensionWeights::from_map)
            .unwrap_or_default();

        let tier_defaults = TierThresholds::default();
        let tiers = TierThresholds {
            advanced_min: scoring
                .and_then(|scoring| scoring.advanced_min)
                .unwrap_or(tier_defaults.advanced_min),
            intermediate_min: scoring
                .and_then(|scoring| scoring.intermediate_min)
                .unwrap_or(tier_defaults.intermediate_min),
        };

        let confidence_defaults = ConfidenceThresholds::default();
        let confidence_cfg = config.and_then(|cfg| cfg.confidence.as_ref());
        let confidence = ConfidenceThresholds {
            high: resolve_level(
                confidence_cfg.and_then(|c| c.high.as_ref()),
                confidence_defaults.high,
            ),
            medium: resolve_level(
                confidence_cfg.and_then(|c| c.medium.as_ref()),
                confidence_defaults.medium,
            ),
        };

        let scan = config.and_then(|cfg| cfg.scan.as_ref());
        let mut excluded_dirs: BTreeSet<String> =
            EXCLUDED_DIRS.iter().map(|name| name.to_string()).collect();
        if let Some(scan) = scan {
            excluded_dirs.extend(
                scan.excluded_dirs
                    .iter()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty()),
            );
        }

        Self {
            project_name: config.and_then(|cfg| cfg.project.name.clone()),
            language,
            weights,
            tiers,
            confidence,
            excluded_dirs,
            error_sample_limit: scan
                .and_then(|scan| scan.error_sample_limit)
                .unwrap_or(DEFAULT_ERROR_SAMPLE_LIMIT),
        }
    }

    /// Lower-cased language hint used to pick language-specific tables.
    pub fn language_key(&self) -> Option<String> {
        self.language.as_ref().map(|language| language.to_lowercase())
    }
}

fn resolve_level(level: Option<&ConfidenceLevelConfig>, fallback: ConfidenceLevel) -> ConfidenceLevel {
    match level {
        Some(level) => ConfidenceLevel {
            min_files: level.min_files.unwrap_or(fallback.min_files),
            min_commits: level.min_commits.unwrap_or(fallback.min_commits),
        },
        None => fallback,
    }
}

impl MirrorConfig {
    pub fn validate(&self) -> Result<(), MirrorError> {
        if let Some(weights) = self.scoring.as_ref().and_then(|s| s.weights.as_ref()) {
            let mut unknown = weights
                .keys()
                .filter(|key| !WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(MirrorError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let settings = Settings::resolve(Some(self), None);
        let weights = settings.weights.as_array();
        if weights.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(MirrorError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = weights.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(MirrorError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        let tiers = settings.tiers;
        if !(0.0..=100.0).contains(&tiers.advanced_min)
            || !(0.0..=100.0).contains(&tiers.intermediate_min)
        {
            return Err(MirrorError::ConfigParse(
                "scoring tier thresholds must be between 0 and 100".to_string(),
            ));
        }
        if tiers.intermediate_min >= tiers.advanced_min {
            return Err(MirrorError::ConfigParse(format!(
                "scoring.intermediate_min ({}) must be below scoring.advanced_min ({})",
                tiers.intermediate_min, tiers.advanced_min
            )));
        }

        let confidence = settings.confidence;
        if confidence.medium.min_files > confidence.high.min_files
            || confidence.medium.min_commits > confidence.high.min_commits
        {
            return Err(MirrorError::ConfigParse(
                "confidence.medium cannot be stricter than confidence.high".to_string(),
            ));
        }

        if settings.error_sample_limit == 0 {
            return Err(MirrorError::ConfigParse(
                "scan.error_sample_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[project]
name = "sample"
language = "Python"
"#,
        )
        .expect("minimal config should parse");
        assert_eq!(cfg.project.name.as_deref(), Some("sample"));

        let settings = Settings::resolve(Some(&cfg), None);
        assert_eq!(settings.language_key().as_deref(), Some("python"));
        assert_eq!(settings.weights, DimensionWeights::default());
        assert_eq!(settings.error_sample_limit, DEFAULT_ERROR_SAMPLE_LIMIT);
    }

    #[test]
    fn default_weights_sum_to_one() {
        let sum: f64 = DimensionWeights::default().as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cli_language_overrides_config_language() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[project]
language = "python"
"#,
        )
        .expect("config should parse");
        let settings = Settings::resolve(Some(&cfg), Some("Go"));
        assert_eq!(settings.language_key().as_deref(), Some("go"));
    }

    #[test]
    fn extra_excluded_dirs_extend_defaults() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scan]
excluded_dirs = ["generated", " "]
error_sample_limit = 25
"#,
        )
        .expect("config should parse");
        let settings = Settings::resolve(Some(&cfg), None);
        assert!(settings.excluded_dirs.contains("generated"));
        assert!(settings.excluded_dirs.contains("node_modules"));
        assert!(!settings.excluded_dirs.contains(""));
        assert_eq!(settings.error_sample_limit, 25);
    }

    #[test]
    fn validate_rejects_invalid_weight_sum() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scoring.weights]
code_quality = 0.9
structure_modularity = 0.9
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn validate_rejects_unknown_weight_keys() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scoring.weights]
code_quality = 0.30
popularity = 0.01
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown key"));
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn validate_accepts_rebalanced_weights() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scoring.weights]
code_quality = 0.25
structure_modularity = 0.25
documentation = 0.15
testing_maintainability = 0.15
git_practices = 0.10
real_world_readiness = 0.10
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_tiers() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scoring]
advanced_min = 50.0
intermediate_min = 70.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("must be below"));
    }

    #[test]
    fn validate_rejects_medium_confidence_stricter_than_high() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[confidence.medium]
min_files = 50
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_sample_limit() {
        let cfg: MirrorConfig = toml::from_str(
            r#"
[scan]
error_sample_limit = 0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("error_sample_limit"));
    }
}
