use crate::analyze::DimensionBuilder;
use crate::types::metrics::FileStructure;
use crate::types::scoring::{Dimension, DimensionScore};

pub fn score(structure: &FileStructure, weight: f64) -> DimensionScore {
    if structure.total_files == 0 {
        return DimensionScore::empty(
            Dimension::StructureModularity,
            weight,
            "No files found in repository",
        );
    }

    let mut dim = DimensionBuilder::new(Dimension::StructureModularity);

    match structure.total_files {
        5..=50 => {
            dim.add(25)
                .level("file_count", "optimal")
                .reason("Well-sized project");
        }
        0..=100 => {
            dim.add(20).level("file_count", "good");
        }
        201.. => {
            dim.add(10)
                .level("file_count", "large")
                .reason("Large project with many files");
        }
        _ => {
            dim.add(15).level("file_count", "moderate");
        }
    }

    let depth = structure.max_depth;
    match depth {
        2..=5 => {
            dim.add(25)
                .level("depth", "optimal")
                .reason(format!("Good directory depth ({depth})"));
        }
        0..=7 => {
            dim.add(18).level("depth", "acceptable");
        }
        11.. => {
            dim.add(8)
                .level("depth", "too_deep")
                .reason(format!("Deep directory nesting ({depth} levels)"));
        }
        _ => {
            dim.add(15).level("depth", "moderate");
        }
    }

    let code_ratio = structure.total_code_files as f64 / structure.total_files as f64;
    if code_ratio >= 0.6 {
        dim.add(20)
            .level("code_ratio", "high")
            .reason("High proportion of code files");
    } else if code_ratio >= 0.3 {
        dim.add(15).level("code_ratio", "moderate");
    } else {
        dim.add(8).level("code_ratio", "low");
    }

    match structure.directories {
        0 => {
            dim.add(3).reason("Flat structure with few directories");
        }
        1 | 2 => {
            dim.add(10);
        }
        _ => {
            dim.add(15).reason("Well-organized with multiple directories");
        }
    }

    match structure.file_types.len() {
        0..=2 => {
            dim.add(5).level("diversity", "low");
        }
        3 | 4 => {
            dim.add(10).level("diversity", "moderate");
        }
        _ => {
            dim.add(15).level("diversity", "high");
        }
    }

    dim.finish(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::Signal;
    use std::collections::BTreeMap;

    fn structure(files: usize, code: usize, depth: usize, dirs: usize, types: usize) -> FileStructure {
        FileStructure {
            total_files: files,
            total_code_files: code,
            max_depth: depth,
            directories: dirs,
            file_types: (0..types).map(|i| (format!(".e{i}"), 1)).collect::<BTreeMap<_, _>>(),
            ..FileStructure::default()
        }
    }

    #[test]
    fn no_files_short_circuits() {
        let score = score(&FileStructure::default(), 0.2);
        assert_eq!(score.score, 0.0);
        assert_eq!(score.weighted_score, 0.0);
        assert!(score.signals.is_empty());
        assert_eq!(score.reasoning, "No files found in repository");
    }

    #[test]
    fn well_shaped_project_scores_full_marks() {
        let score = score(&structure(30, 20, 3, 6, 5), 0.2);
        assert_eq!(score.score, 100.0);
        assert_eq!(score.weighted_score, 20.0);
        assert_eq!(score.signals.get("depth"), Some(&Signal::Level("optimal")));
    }

    #[test]
    fn file_count_bands_cover_every_range() {
        let level = |files: usize| {
            let score = score(&structure(files, 0, 3, 1, 1), 0.2);
            score.signals.get("file_count").cloned()
        };
        assert_eq!(level(3), Some(Signal::Level("good")));
        assert_eq!(level(50), Some(Signal::Level("optimal")));
        assert_eq!(level(100), Some(Signal::Level("good")));
        assert_eq!(level(150), Some(Signal::Level("moderate")));
        assert_eq!(level(200), Some(Signal::Level("moderate")));
        assert_eq!(level(201), Some(Signal::Level("large")));
    }

    #[test]
    fn depth_bands_cover_every_range() {
        let level = |depth: usize| {
            let score = score(&structure(10, 5, depth, 1, 1), 0.2);
            score.signals.get("depth").cloned()
        };
        assert_eq!(level(0), Some(Signal::Level("acceptable")));
        assert_eq!(level(1), Some(Signal::Level("acceptable")));
        assert_eq!(level(5), Some(Signal::Level("optimal")));
        assert_eq!(level(7), Some(Signal::Level("acceptable")));
        assert_eq!(level(9), Some(Signal::Level("moderate")));
        assert_eq!(level(11), Some(Signal::Level("too_deep")));
    }

    #[test]
    fn flat_single_type_tree_scores_low() {
        // 20 (file count 1..4) + 18 + 8 + 3 + 5
        let score = score(&structure(1, 0, 0, 0, 1), 0.2);
        assert_eq!(score.score, 54.0);
        assert!(score.reasoning.contains("Flat structure"));
    }
}
