use crate::analyze::DimensionBuilder;
use crate::types::metrics::{CadenceTrend, GitMetrics};
use crate::types::scoring::{Dimension, DimensionScore};

pub fn score(git: &GitMetrics, weight: f64) -> DimensionScore {
    if git.total_commits == 0 {
        return DimensionScore::empty(Dimension::GitPractices, weight, "No commit history");
    }

    let mut dim = DimensionBuilder::new(Dimension::GitPractices);
    let total = git.total_commits;

    match total {
        20.. => {
            dim.add(20)
                .level("commit_count", "high")
                .reason(format!("Healthy commit history ({total} commits)"));
        }
        10..=19 => {
            dim.add(15).level("commit_count", "moderate");
        }
        5..=9 => {
            dim.add(10).level("commit_count", "low");
        }
        _ => {
            dim.add(5)
                .level("commit_count", "very_low")
                .reason(format!("Few commits ({total})"));
        }
    }

    let good_ratio = git.good_commit_messages as f64 / total as f64;
    if good_ratio >= 0.7 {
        dim.add(25)
            .level("message_quality", "excellent")
            .reason("Excellent commit message quality");
    } else if good_ratio >= 0.5 {
        dim.add(18)
            .level("message_quality", "good")
            .reason("Good commit messages");
    } else if good_ratio >= 0.3 {
        dim.add(10).level("message_quality", "moderate");
    } else {
        dim.add(5)
            .level("message_quality", "poor")
            .reason("Poor commit message quality");
    }

    match git.commit_frequency_trend {
        CadenceTrend::Active => {
            dim.add(20)
                .level("activity", "active")
                .reason("Recently active development");
        }
        CadenceTrend::Moderate => {
            dim.add(12).level("activity", "moderate");
        }
        CadenceTrend::Inactive => {
            dim.add(5)
                .level("activity", "inactive")
                .reason("Low recent activity");
        }
        CadenceTrend::Unknown => {
            dim.add(10).level("activity", "unknown");
        }
    }

    let incremental_ratio = git.incremental_commits as f64 / total as f64;
    if incremental_ratio >= 0.7 {
        dim.add(20)
            .level("commit_style", "incremental")
            .reason("Incremental development approach");
    } else if incremental_ratio >= 0.4 {
        dim.add(12).level("commit_style", "mixed");
    } else {
        dim.add(5)
            .level("commit_style", "large_commits")
            .reason("Many large commits");
    }

    let branching = git.total_branches > 1;
    dim.flag("branching", branching);
    if branching {
        dim.add(15)
            .reason(format!("Uses branches ({})", git.total_branches));
    } else {
        dim.reason("Single branch development");
    }

    dim.finish(weight)
}
