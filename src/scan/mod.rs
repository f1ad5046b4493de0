pub mod catalog;
pub mod code;
pub mod commits;
pub mod complexity;
pub mod filesystem;
pub mod git_meta;
pub mod history;
pub mod lines;
pub mod maturity;
pub mod structure;

use crate::error::Result;
use crate::types::config::Settings;
use crate::types::metrics::{CodeMetrics, FileStructure, GitMetrics, MaturityMetrics, TestingMetrics};
use chrono::{DateTime, Utc};
use commits::ConventionalPolicy;
use complexity::TreeSitterAnalyzer;
use filesystem::Inventory;
use lines::CommentStyle;
use std::path::{Path, PathBuf};
use tracing::info;

/// Every metric bundle extracted from one repository snapshot.
#[derive(Debug, Clone)]
pub struct RepoModel {
    pub root: PathBuf,
    pub snapshot_digest: String,
    pub file_structure: FileStructure,
    pub code_metrics: CodeMetrics,
    pub git_metrics: GitMetrics,
    pub testing_metrics: TestingMetrics,
    pub maturity_metrics: MaturityMetrics,
}

/// Walk the tree once, read the history, and run every extractor against the shared inventory.
pub fn discover(root: &Path, settings: &Settings, evaluated_at: DateTime<Utc>) -> Result<RepoModel> {
    let language = settings.language_key();
    let language = language.as_deref();

    let inventory = Inventory::build(root, &settings.excluded_dirs);
    info!(
        files = inventory.files().len(),
        dirs = inventory.dirs().len(),
        "inventory built"
    );

    let file_structure = structure::analyze_structure(&inventory);
    let code_metrics = code::analyze_code(
        &inventory,
        &catalog::code_extensions_for(language),
        &TreeSitterAnalyzer,
        &CommentStyle::default(),
    );
    info!(
        files_analyzed = code_metrics.files_analyzed,
        functions = code_metrics.functions_count,
        "code metrics collected"
    );

    let commits = git_meta::read_commits(root)?;
    let branches = git_meta::branch_count(root)?;
    let git_metrics =
        history::summarize_history(&commits, branches, evaluated_at, &ConventionalPolicy);
    info!(
        commits = git_metrics.total_commits,
        branches, "history collected"
    );

    let testing_metrics = maturity::analyze_testing(&inventory, language);
    let maturity_metrics =
        maturity::analyze_maturity(&inventory, language, settings.error_sample_limit);

    Ok(RepoModel {
        root: root.to_path_buf(),
        snapshot_digest: inventory.digest(),
        file_structure,
        code_metrics,
        git_metrics,
        testing_metrics,
        maturity_metrics,
    })
}
