//! Human-readable strengths, weaknesses, roadmap and summary derived from a
//! finished analysis. Rules are evaluated in a fixed order and the lists are
//! truncated, so earlier rules win.

use crate::analyze::percent;
use crate::types::report::{AnalysisResult, Effort, Impact, RoadmapItem};
use crate::types::scoring::DimensionScore;

const MAX_STRENGTHS: usize = 5;
const MAX_WEAKNESSES: usize = 6;
const MAX_ROADMAP: usize = 8;

fn whole_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

fn with_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

pub fn strengths(analysis: &AnalysisResult) -> Vec<String> {
    let code = &analysis.code_metrics;
    let maturity = &analysis.maturity_metrics;
    let mut strengths = analysis
        .dimension_scores
        .iter()
        .filter(|dimension| dimension.percentage >= 0.8)
        .map(|dimension| format!("{}: {}", dimension.name, dimension.reasoning))
        .collect::<Vec<_>>();

    if code.comment_ratio >= 0.15 {
        strengths.push(format!(
            "Well-documented code with {} comment ratio",
            percent(code.comment_ratio)
        ));
    }
    if code.avg_complexity <= 5.0 {
        strengths.push(format!(
            "Low cyclomatic complexity (avg {:.1})",
            code.avg_complexity
        ));
    }
    if analysis.git_metrics.total_commits >= 20 {
        strengths.push(format!(
            "Substantial development history with {} commits",
            analysis.git_metrics.total_commits
        ));
    }
    if analysis.testing_metrics.has_ci_cd {
        strengths.push(format!(
            "Automated testing with {}",
            analysis.testing_metrics.ci_cd_tools.join(", ")
        ));
    }
    if maturity.error_handling_score >= 0.6 {
        strengths.push(format!(
            "Strong error handling practices ({} of files)",
            whole_percent(maturity.error_handling_score)
        ));
    }
    if maturity.feature_count() >= 3 {
        strengths.push(format!(
            "Production-ready features: {}",
            maturity.present_features().join(", ")
        ));
    }

    if strengths.is_empty() {
        strengths.push("Repository structure is present".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);
    strengths
}

pub fn weaknesses(analysis: &AnalysisResult) -> Vec<String> {
    let code = &analysis.code_metrics;
    let structure = &analysis.file_structure;
    let mut weaknesses = analysis
        .dimension_scores
        .iter()
        .filter(|dimension| dimension.percentage < 0.5)
        .map(|dimension| format!("{}: {}", dimension.name, dimension.reasoning))
        .collect::<Vec<_>>();

    if !structure.has_key_file("readme") {
        weaknesses.push("Missing README.md - critical for project documentation".to_string());
    }
    if !structure.has_key_file("license") {
        weaknesses.push("Missing LICENSE - unclear legal status".to_string());
    }
    if code.comment_ratio < 0.05 {
        weaknesses.push(format!(
            "Very low comment ratio ({}) - code may be hard to understand",
            percent(code.comment_ratio)
        ));
    }
    if code.avg_complexity > 15.0 {
        weaknesses.push(format!(
            "High average complexity ({:.1}) - refactoring recommended",
            code.avg_complexity
        ));
    }
    if !analysis.testing_metrics.has_test_directory {
        weaknesses.push("No tests detected - code quality and reliability uncertain".to_string());
    }
    if !analysis.testing_metrics.has_ci_cd {
        weaknesses.push("No CI/CD configuration - manual testing and deployment".to_string());
    }
    if !analysis.maturity_metrics.has_package_manager {
        weaknesses.push("No package manager detected - dependency management unclear".to_string());
    }
    if analysis.git_metrics.total_commits < 5 {
        weaknesses.push(format!(
            "Limited commit history ({} commits) - maturity uncertain",
            analysis.git_metrics.total_commits
        ));
    }
    let good_ratio = analysis.good_message_ratio();
    if good_ratio < 0.3 {
        weaknesses.push(format!(
            "Poor commit message quality ({} are descriptive)",
            whole_percent(good_ratio)
        ));
    }
    if analysis.maturity_metrics.error_handling_score < 0.2 {
        weaknesses.push("Minimal error handling - production readiness concern".to_string());
    }

    if weaknesses.is_empty() {
        weaknesses.push("Minor improvements possible in some areas".to_string());
    }
    weaknesses.truncate(MAX_WEAKNESSES);
    weaknesses
}

struct Roadmap {
    items: Vec<RoadmapItem>,
}

impl Roadmap {
    fn push(&mut self, action: &str, effort: Effort, impact: Impact, rationale: impl Into<String>) {
        self.items.push(RoadmapItem {
            priority: self.items.len() + 1,
            action: action.to_string(),
            effort,
            impact,
            rationale: rationale.into(),
        });
    }
}

/// Prioritised improvement steps, most important first.
pub fn roadmap(analysis: &AnalysisResult) -> Vec<RoadmapItem> {
    let structure = &analysis.file_structure;
    let testing = &analysis.testing_metrics;
    let code = &analysis.code_metrics;
    let mut plan = Roadmap { items: Vec::new() };

    if !structure.has_key_file("readme") {
        plan.push(
            "Create a comprehensive README.md with project overview, installation instructions, and usage examples",
            Effort::Low,
            Impact::High,
            "README is the first thing users see and is critical for adoption",
        );
    }
    if !testing.has_test_directory {
        plan.push(
            "Set up a testing framework and write unit tests for core functionality",
            Effort::Medium,
            Impact::High,
            "Tests ensure code reliability and facilitate refactoring",
        );
    }
    if !testing.has_ci_cd {
        plan.push(
            "Configure CI/CD pipeline (GitHub Actions, GitLab CI, or similar) to automate testing",
            Effort::Low,
            Impact::High,
            "Automated testing prevents regressions and improves code quality",
        );
    }
    if code.comment_ratio < 0.08 {
        plan.push(
            "Add inline comments and docstrings to complex functions and classes",
            Effort::Medium,
            Impact::Medium,
            "Documentation helps other developers understand and maintain the code",
        );
    }
    if !structure.has_key_file("license") {
        plan.push(
            "Add a LICENSE file to clarify usage rights (MIT, Apache 2.0, GPL, etc.)",
            Effort::Low,
            Impact::Medium,
            "License is essential for open source projects and legal clarity",
        );
    }
    if code.avg_complexity > 15.0 {
        plan.push(
            "Refactor high-complexity functions into smaller, single-purpose functions",
            Effort::High,
            Impact::High,
            format!(
                "Average complexity of {:.1} indicates maintainability issues",
                code.avg_complexity
            ),
        );
    }
    if !testing.has_linter_config {
        plan.push(
            "Add linter configuration (ESLint, Pylint, etc.) to enforce code style",
            Effort::Low,
            Impact::Medium,
            "Linters catch bugs early and maintain consistent code style",
        );
    }
    if !analysis.maturity_metrics.has_config_example {
        plan.push(
            "Create .env.example or config.example files to document required configuration",
            Effort::Low,
            Impact::Medium,
            "Configuration examples make local setup easier for contributors",
        );
    }
    if analysis.good_message_ratio() < 0.5 {
        plan.push(
            "Adopt conventional commits or a commit message standard (feat:, fix:, docs:, etc.)",
            Effort::Low,
            Impact::Low,
            "Clear commit messages improve project history and collaboration",
        );
    }
    if analysis.maturity_metrics.error_handling_score < 0.3 {
        plan.push(
            "Add try-catch blocks and error handling to critical code paths",
            Effort::Medium,
            Impact::High,
            "Proper error handling prevents crashes and improves user experience",
        );
    }
    if structure.max_depth > 8 {
        plan.push(
            "Flatten deeply nested directory structure to improve code navigation",
            Effort::Medium,
            Impact::Low,
            format!(
                "Current depth of {} levels makes navigation difficult",
                structure.max_depth
            ),
        );
    }
    if !structure.has_key_file("contributing") {
        plan.push(
            "Add CONTRIBUTING.md to guide new contributors",
            Effort::Low,
            Impact::Low,
            "Contribution guidelines lower the barrier for external contributions",
        );
    }

    plan.items.truncate(MAX_ROADMAP);
    plan.items
}

/// First dimension with the highest percentage and first with the lowest.
fn extremes(dimensions: &[DimensionScore]) -> Option<(&DimensionScore, &DimensionScore)> {
    let first = dimensions.first()?;
    let (top, bottom) = dimensions.iter().skip(1).fold((first, first), |(top, bottom), d| {
        (
            if d.percentage > top.percentage { d } else { top },
            if d.percentage < bottom.percentage { d } else { bottom },
        )
    });
    Some((top, bottom))
}

pub fn summary(analysis: &AnalysisResult) -> String {
    let language = analysis
        .repository
        .primary_language
        .as_deref()
        .unwrap_or("multiple languages");
    let mut parts = vec![format!(
        "This {language} repository scores {}/100, placing it in the {} tier.",
        analysis.overall_score, analysis.tier
    )];

    if let Some((top, bottom)) = extremes(&analysis.dimension_scores) {
        parts.push(format!(
            "Strongest area is {} ({}), while {} needs improvement ({}).",
            top.name,
            whole_percent(top.percentage),
            bottom.name,
            whole_percent(bottom.percentage)
        ));
    }

    let code = &analysis.code_metrics;
    if code.files_analyzed > 0 {
        parts.push(format!(
            "Code analysis covered {} files with {} lines of code.",
            code.files_analyzed,
            with_thousands(code.total_lines)
        ));
    }

    if analysis.testing_metrics.has_test_directory {
        parts.push(format!(
            "Testing practices are established with {} test files.",
            analysis.testing_metrics.test_files_count
        ));
    } else {
        parts.push("No testing infrastructure detected.".to_string());
    }

    let git = &analysis.git_metrics;
    if git.total_commits >= 10 {
        parts.push(format!(
            "Development history shows {} commits with {} recent activity.",
            git.total_commits, git.commit_frequency_trend
        ));
    }

    let features = analysis.maturity_metrics.feature_count();
    if features >= 2 {
        parts.push(format!(
            "Project demonstrates {features} production-ready features."
        ));
    }

    parts.join(" ")
}
