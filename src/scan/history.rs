use crate::scan::commits::{CommitSize, MessagePolicy};
use crate::scan::git_meta::CommitRecord;
use crate::types::metrics::{round_to, CadenceTrend, GitMetrics};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

const TREND_MIN_COMMITS: usize = 10;
const RECENT_WINDOW_DAYS: i64 = 30;
const ACTIVE_SHARE: f64 = 0.3;
const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 3600.0;

/// Aggregate a commit list into history metrics. Commit order does not matter.
pub fn summarize_history(
    commits: &[CommitRecord],
    branches: usize,
    evaluated_at: DateTime<Utc>,
    policy: &dyn MessagePolicy,
) -> GitMetrics {
    if commits.is_empty() {
        return GitMetrics {
            total_branches: branches,
            ..GitMetrics::default()
        };
    }

    let total = commits.len();
    let mut authors = BTreeSet::new();
    let mut message_chars = 0usize;
    let mut good = 0usize;
    let mut large = 0usize;
    let mut incremental = 0usize;

    for commit in commits {
        authors.insert(commit.author_email.as_str());
        message_chars += commit.subject.chars().count();
        if policy.is_descriptive(&commit.subject) {
            good += 1;
        }
        match CommitSize::classify(commit.changed_lines()) {
            CommitSize::Large => large += 1,
            CommitSize::Incremental => incremental += 1,
            CommitSize::Empty => {}
        }
    }

    GitMetrics {
        total_commits: total,
        unique_authors: authors.len(),
        avg_commits_per_week: round_to(commits_per_week(commits), 2),
        commit_frequency_trend: cadence_trend(commits, evaluated_at),
        avg_commit_message_length: round_to(message_chars as f64 / total as f64, 2),
        good_commit_messages: good,
        poor_commit_messages: total - good,
        total_branches: branches,
        large_commits: large,
        incremental_commits: incremental,
    }
}

fn commits_per_week(commits: &[CommitRecord]) -> f64 {
    let distinct = commits
        .iter()
        .map(|commit| commit.committed_at)
        .collect::<BTreeSet<_>>();
    let (Some(first), Some(last)) = (distinct.first(), distinct.last()) else {
        return 0.0;
    };
    if distinct.len() < 2 {
        return 0.0;
    }

    let span_seconds = (*last - *first).num_seconds() as f64;
    let weeks = (span_seconds / SECONDS_PER_WEEK).max(1.0);
    commits.len() as f64 / weeks
}

fn cadence_trend(commits: &[CommitRecord], evaluated_at: DateTime<Utc>) -> CadenceTrend {
    if commits.len() < TREND_MIN_COMMITS {
        return CadenceTrend::Unknown;
    }

    let cutoff = evaluated_at - Duration::days(RECENT_WINDOW_DAYS);
    let recent = commits
        .iter()
        .filter(|commit| commit.committed_at > cutoff)
        .count();

    if recent as f64 > commits.len() as f64 * ACTIVE_SHARE {
        CadenceTrend::Active
    } else if recent > 0 {
        CadenceTrend::Moderate
    } else {
        CadenceTrend::Inactive
    }
}
