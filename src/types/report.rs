use crate::types::metrics::{
    CodeMetrics, FileStructure, GitMetrics, MaturityMetrics, TestingMetrics,
};
use crate::types::scoring::{Confidence, DimensionScore, Score, Tier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: String,
    pub primary_language: Option<String>,
    /// sha256 over the sorted inventory (relative path and size of every file).
    pub snapshot_digest: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub repository: RepositoryInfo,
    pub file_structure: FileStructure,
    pub code_metrics: CodeMetrics,
    pub git_metrics: GitMetrics,
    pub testing_metrics: TestingMetrics,
    pub maturity_metrics: MaturityMetrics,
    pub dimension_scores: Vec<DimensionScore>,
    pub overall_score: Score,
    pub tier: Tier,
    pub confidence: Confidence,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn good_message_ratio(&self) -> f64 {
        self.git_metrics.good_commit_messages as f64 / self.git_metrics.total_commits.max(1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapItem {
    pub priority: usize,
    pub action: String,
    pub effort: Effort,
    pub impact: Impact,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionDetail {
    pub name: String,
    pub score: Score,
    pub max_score: Score,
    pub percentage: f64,
    pub weight: f64,
    pub weighted_score: Score,
    pub reasoning: String,
    pub signals: BTreeMap<&'static str, crate::types::scoring::Signal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetrics {
    pub total_files: usize,
    pub code_files: usize,
    pub total_commits: usize,
    pub total_lines: usize,
    pub functions: usize,
    pub avg_complexity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub repository: RepositoryInfo,
    pub metrics: HeadlineMetrics,
    /// In scoring order: code quality first, real-world readiness last.
    pub dimensions: Vec<DimensionDetail>,
    pub analyzed_at: DateTime<Utc>,
}

/// Document handed to output formatting.
#[derive(Debug, Clone, Serialize)]
pub struct FinalOutput {
    pub score: Score,
    pub tier: Tier,
    pub confidence: Confidence,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub roadmap: Vec<RoadmapItem>,
    pub metadata: OutputMetadata,
}

impl FinalOutput {
    pub fn new(analysis: &AnalysisResult, summary: String, roadmap: Vec<RoadmapItem>) -> Self {
        let dimensions = analysis
            .dimension_scores
            .iter()
            .map(|dimension| DimensionDetail {
                name: dimension.name.clone(),
                score: dimension.score,
                max_score: dimension.max_score,
                percentage: dimension.percentage,
                weight: dimension.weight,
                weighted_score: dimension.weighted_score,
                reasoning: dimension.reasoning.clone(),
                signals: dimension.signals.clone(),
            })
            .collect();

        Self {
            score: analysis.overall_score,
            tier: analysis.tier,
            confidence: analysis.confidence,
            summary,
            strengths: analysis.strengths.clone(),
            weaknesses: analysis.weaknesses.clone(),
            roadmap,
            metadata: OutputMetadata {
                repository: analysis.repository.clone(),
                metrics: HeadlineMetrics {
                    total_files: analysis.file_structure.total_files,
                    code_files: analysis.file_structure.total_code_files,
                    total_commits: analysis.git_metrics.total_commits,
                    total_lines: analysis.code_metrics.total_lines,
                    functions: analysis.code_metrics.functions_count,
                    avg_complexity: analysis.code_metrics.avg_complexity,
                },
                dimensions,
                analyzed_at: analysis.timestamp,
            },
        }
    }
}
