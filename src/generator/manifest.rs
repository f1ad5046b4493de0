use crate::error::{MirrorError, Result};
use crate::types::report::{AnalysisResult, RoadmapItem};
use crate::types::scoring::{Score, Tier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ROADMAP_DIR: &str = ".mirror/roadmaps";

/// Roadmap snapshot written by `roadmap --export`.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapExport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub snapshot_digest: String,
    pub score: Score,
    pub tier: Tier,
    pub items: Vec<RoadmapItem>,
}

impl RoadmapExport {
    pub fn new(analysis: &AnalysisResult, items: Vec<RoadmapItem>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: analysis.timestamp,
            repository: analysis.repository.name.clone(),
            snapshot_digest: analysis.repository.snapshot_digest.clone(),
            score: analysis.overall_score,
            tier: analysis.tier,
            items,
        }
    }
}

/// Write the export under `<root>/.mirror/roadmaps/`, named after its timestamp.
pub fn write_roadmap(root: &Path, export: &RoadmapExport) -> Result<PathBuf> {
    let dir = root.join(ROADMAP_DIR);
    fs::create_dir_all(&dir).map_err(MirrorError::Io)?;
    let stamp = export.generated_at.format("%Y%m%dT%H%M%SZ");
    let out_path = dir.join(format!("roadmap-{stamp}.json"));
    let json = serde_json::to_string_pretty(export)?;
    fs::write(&out_path, json).map_err(MirrorError::Io)?;
    Ok(out_path)
}
