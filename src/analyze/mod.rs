pub mod code_quality;
pub mod documentation;
pub mod git_practices;
pub mod insights;
pub mod readiness;
pub mod structure;
pub mod testing;

use crate::scan::RepoModel;
use crate::types::config::{ConfidenceLevel, ConfidenceThresholds, Settings, TierThresholds};
use crate::types::metrics::round_to;
use crate::types::report::{AnalysisResult, RepositoryInfo};
use crate::types::scoring::{
    Confidence, Dimension, DimensionScore, Score, Signal, Tier, MAX_DIMENSION_SCORE,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Accumulates band points, signals and reasons for one dimension.
pub(crate) struct DimensionBuilder {
    dimension: Dimension,
    points: i32,
    signals: BTreeMap<&'static str, Signal>,
    reasons: Vec<String>,
}

impl DimensionBuilder {
    pub(crate) fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            points: 0,
            signals: BTreeMap::new(),
            reasons: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, points: i32) -> &mut Self {
        self.points += points;
        self
    }

    pub(crate) fn level(&mut self, key: &'static str, level: &'static str) -> &mut Self {
        self.signals.insert(key, Signal::Level(level));
        self
    }

    pub(crate) fn flag(&mut self, key: &'static str, present: bool) -> &mut Self {
        self.signals.insert(key, Signal::Flag(present));
        self
    }

    pub(crate) fn reason(&mut self, reason: impl Into<String>) -> &mut Self {
        self.reasons.push(reason.into());
        self
    }

    /// Clamp to 0..=100 and derive percentage and weighted score.
    pub(crate) fn finish(self, weight: f64) -> DimensionScore {
        let score = Score::from(self.points).clamp(0.0, MAX_DIMENSION_SCORE);
        let percentage = score / MAX_DIMENSION_SCORE;
        let reasoning = if self.reasons.is_empty() {
            self.dimension.fallback_reasoning().to_string()
        } else {
            self.reasons.join("; ")
        };

        DimensionScore {
            dimension: self.dimension,
            name: self.dimension.display_name().to_string(),
            score,
            max_score: MAX_DIMENSION_SCORE,
            percentage: round_to(percentage, 3),
            weight,
            weighted_score: round_to(percentage * weight * 100.0, 2),
            signals: self.signals,
            reasoning,
        }
    }
}

impl DimensionScore {
    /// Zero score used when there is nothing to measure.
    pub(crate) fn empty(dimension: Dimension, weight: f64, reasoning: &str) -> Self {
        Self {
            dimension,
            name: dimension.display_name().to_string(),
            score: 0.0,
            max_score: MAX_DIMENSION_SCORE,
            percentage: 0.0,
            weight,
            weighted_score: 0.0,
            signals: BTreeMap::new(),
            reasoning: reasoning.to_string(),
        }
    }
}

/// Percent with one decimal, e.g. `0.153` → `15.3%`.
pub(crate) fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn score_dimensions(model: &RepoModel, settings: &Settings) -> Vec<DimensionScore> {
    let weights = &settings.weights;
    vec![
        code_quality::score(&model.code_metrics, weights.code_quality),
        structure::score(&model.file_structure, weights.structure_modularity),
        documentation::score(&model.file_structure, weights.documentation),
        testing::score(
            &model.testing_metrics,
            &model.code_metrics,
            weights.testing_maintainability,
        ),
        git_practices::score(&model.git_metrics, weights.git_practices),
        readiness::score(
            &model.maturity_metrics,
            &model.file_structure,
            weights.real_world_readiness,
        ),
    ]
}

pub fn overall_score(dimensions: &[DimensionScore]) -> Score {
    round_to(
        dimensions
            .iter()
            .map(|dimension| dimension.weighted_score)
            .sum(),
        2,
    )
}

pub fn determine_tier(score: Score, thresholds: &TierThresholds) -> Tier {
    if score >= thresholds.advanced_min {
        Tier::Advanced
    } else if score >= thresholds.intermediate_min {
        Tier::Intermediate
    } else {
        Tier::Beginner
    }
}

/// Both the file and the commit floor of a level must be met.
pub fn determine_confidence(
    total_files: usize,
    total_commits: usize,
    thresholds: &ConfidenceThresholds,
) -> Confidence {
    let meets = |level: &ConfidenceLevel| {
        total_files >= level.min_files && total_commits >= level.min_commits
    };
    if meets(&thresholds.high) {
        Confidence::High
    } else if meets(&thresholds.medium) {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Score a discovered repository and attach strengths and weaknesses.
pub fn analyze(model: &RepoModel, settings: &Settings, evaluated_at: DateTime<Utc>) -> AnalysisResult {
    let dimension_scores = score_dimensions(model, settings);
    let overall = overall_score(&dimension_scores);

    let name = settings.project_name.clone().unwrap_or_else(|| {
        model
            .root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| model.root.display().to_string())
    });

    let mut result = AnalysisResult {
        repository: RepositoryInfo {
            name,
            path: model.root.display().to_string(),
            primary_language: settings.language.clone(),
            snapshot_digest: model.snapshot_digest.clone(),
        },
        file_structure: model.file_structure.clone(),
        code_metrics: model.code_metrics.clone(),
        git_metrics: model.git_metrics.clone(),
        testing_metrics: model.testing_metrics.clone(),
        maturity_metrics: model.maturity_metrics.clone(),
        dimension_scores,
        overall_score: overall,
        tier: determine_tier(overall, &settings.tiers),
        confidence: determine_confidence(
            model.file_structure.total_files,
            model.git_metrics.total_commits,
            &settings.confidence,
        ),
        strengths: Vec::new(),
        weaknesses: Vec::new(),
        timestamp: evaluated_at,
    };

    result.strengths = insights::strengths(&result);
    result.weaknesses = insights::weaknesses(&result);
    result
}
