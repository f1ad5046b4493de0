use regex::Regex;
use std::sync::OnceLock;

pub const LARGE_COMMIT_LINES: u64 = 500;
const MIN_DESCRIPTIVE_CHARS: usize = 10;
const COLON_WINDOW: usize = 50;

static POOR_MESSAGES: OnceLock<Vec<Regex>> = OnceLock::new();
static CONVENTIONAL_PREFIX: OnceLock<Regex> = OnceLock::new();

fn poor_messages() -> &'static [Regex] {
    POOR_MESSAGES.get_or_init(|| {
        vec![
            Regex::new(r"^(fix|update|change|add|remove|modify)$").expect("valid regex"),
            Regex::new(r"^(wip|temp|tmp|test)$").expect("valid regex"),
            Regex::new(r"^\.").expect("valid regex"),
            Regex::new(r"^[0-9]+$").expect("valid regex"),
            Regex::new(r"^(asdf|qwer|aaa|bbb)$").expect("valid regex"),
        ]
    })
}

fn conventional_prefix() -> &'static Regex {
    CONVENTIONAL_PREFIX.get_or_init(|| {
        Regex::new(r"^(feat|fix|docs|style|refactor|test|chore|perf)(\(.+\))?:")
            .expect("valid regex")
    })
}

/// Decides whether a commit subject line is descriptive.
pub trait MessagePolicy {
    fn is_descriptive(&self, subject: &str) -> bool;
}

/// Length gate, poor-vocabulary rejection, then any of: conventional prefix,
/// three or more words, or a colon near the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalPolicy;

impl MessagePolicy for ConventionalPolicy {
    fn is_descriptive(&self, subject: &str) -> bool {
        let message = subject.trim();
        if message.chars().count() < MIN_DESCRIPTIVE_CHARS {
            return false;
        }

        let lowered = message.to_lowercase();
        if poor_messages().iter().any(|pattern| pattern.is_match(&lowered)) {
            return false;
        }

        conventional_prefix().is_match(message)
            || message.split_whitespace().count() >= 3
            || message.chars().take(COLON_WINDOW).any(|c| c == ':')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSize {
    Large,
    Incremental,
    /// No changed lines, or stats were unavailable.
    Empty,
}

impl CommitSize {
    pub fn classify(changed_lines: u64) -> Self {
        match changed_lines {
            0 => Self::Empty,
            1..=LARGE_COMMIT_LINES => Self::Incremental,
            _ => Self::Large,
        }
    }
}
