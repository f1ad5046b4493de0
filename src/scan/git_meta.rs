use crate::error::MirrorError;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, warn};

const RECORD_SEP: char = '\u{1e}';
const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%x1e%H%x1f%ae%x1f%ct%x1f%B%x1f";

/// One commit as read from `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub author_email: String,
    pub committed_at: DateTime<Utc>,
    /// First line of the message.
    pub subject: String,
    pub insertions: u64,
    pub deletions: u64,
}

impl CommitRecord {
    pub fn changed_lines(&self) -> u64 {
        self.insertions + self.deletions
    }
}

/// Full history reachable from HEAD, newest first. An unborn HEAD yields no commits.
pub fn read_commits(root: &Path) -> Result<Vec<CommitRecord>, MirrorError> {
    let head = git(root, &["rev-parse", "--verify", "--quiet", "HEAD"])?;
    if !head.status.success() {
        debug!(root = %root.display(), "HEAD is unborn, history is empty");
        return Ok(Vec::new());
    }

    let output = git(
        root,
        &["log", "--numstat", "--diff-merges=first-parent", LOG_FORMAT],
    )?;
    if !output.status.success() {
        return Err(MirrorError::Git(stderr_text(&output)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_log(&stdout))
}

/// Local branch count.
pub fn branch_count(root: &Path) -> Result<usize, MirrorError> {
    let output = git(root, &["branch", "--list", "--format=%(refname:short)"])?;
    if !output.status.success() {
        return Err(MirrorError::Git(stderr_text(&output)));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter(|line| !line.trim().is_empty()).count())
}

fn git(root: &Path, args: &[&str]) -> Result<Output, MirrorError> {
    Command::new("git")
        .arg("-C")
        .arg(root)
        .args(args)
        .output()
        .map_err(|err| MirrorError::Git(format!("failed to run git: {err}")))
}

fn stderr_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr
    }
}

/// Parse `git log --numstat` output produced with [`LOG_FORMAT`].
///
/// Malformed records are skipped. Binary numstat entries (`-`) count as zero lines.
pub(crate) fn parse_log(raw: &str) -> Vec<CommitRecord> {
    raw.split(RECORD_SEP)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            let parsed = parse_record(record);
            if parsed.is_none() {
                warn!("skipping malformed git log record");
            }
            parsed
        })
        .collect()
}

fn parse_record(record: &str) -> Option<CommitRecord> {
    let mut fields = record.splitn(5, FIELD_SEP);
    let hash = fields.next()?.trim().to_string();
    let author_email = fields.next()?.trim().to_string();
    let seconds = fields.next()?.trim().parse::<i64>().ok()?;
    let body = fields.next()?;
    let stats = fields.next().unwrap_or_default();

    if hash.is_empty() {
        return None;
    }
    let committed_at = DateTime::<Utc>::from_timestamp(seconds, 0)?;
    let subject = body.lines().next().unwrap_or_default().to_string();

    let (insertions, deletions) = stats
        .lines()
        .filter_map(parse_numstat)
        .fold((0, 0), |(ins, del), (a, d)| (ins + a, del + d));

    Some(CommitRecord {
        hash,
        author_email,
        committed_at,
        subject,
        insertions,
        deletions,
    })
}

fn parse_numstat(line: &str) -> Option<(u64, u64)> {
    let mut columns = line.split('\t');
    let added = columns.next()?.trim();
    let removed = columns.next()?.trim();
    columns.next()?;
    Some((added.parse().unwrap_or(0), removed.parse().unwrap_or(0)))
}
