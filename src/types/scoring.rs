use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub type Score = f64;

pub const MAX_DIMENSION_SCORE: Score = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    CodeQuality,
    StructureModularity,
    Documentation,
    TestingMaintainability,
    GitPractices,
    RealWorldReadiness,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::CodeQuality,
        Dimension::StructureModularity,
        Dimension::Documentation,
        Dimension::TestingMaintainability,
        Dimension::GitPractices,
        Dimension::RealWorldReadiness,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::CodeQuality => "Code Quality",
            Self::StructureModularity => "Structure & Modularity",
            Self::Documentation => "Documentation",
            Self::TestingMaintainability => "Testing & Maintainability",
            Self::GitPractices => "Git Practices",
            Self::RealWorldReadiness => "Real-World Readiness",
        }
    }

    pub(crate) fn fallback_reasoning(self) -> &'static str {
        match self {
            Self::CodeQuality => "Code quality metrics analyzed",
            Self::StructureModularity => "Structure metrics analyzed",
            Self::Documentation => "Documentation assessed",
            Self::TestingMaintainability => "Testing and maintainability assessed",
            Self::GitPractices => "Git practices assessed",
            Self::RealWorldReadiness => "Real-world readiness assessed",
        }
    }
}

/// Value recorded for one sub-check of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Signal {
    Flag(bool),
    Level(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub name: String,
    pub score: Score,
    pub max_score: Score,
    pub percentage: f64,
    pub weight: f64,
    pub weighted_score: Score,
    pub signals: BTreeMap<&'static str, Signal>,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Advanced,
    Intermediate,
    Beginner,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Advanced => "Advanced",
            Self::Intermediate => "Intermediate",
            Self::Beginner => "Beginner",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(label)
    }
}
