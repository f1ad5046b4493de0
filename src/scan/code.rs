use crate::scan::complexity::{summarize, FunctionAnalyzer};
use crate::scan::filesystem::{read_text_lossy, Inventory};
use crate::scan::lines::{count_lines, CommentStyle};
use crate::types::metrics::{round_to, CodeMetrics, ComplexityDistribution};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Aggregate line and complexity metrics over every inventory file whose extension is in `extensions`.
///
/// Function length and complexity are averaged per file first and then across
/// the files that contain functions. `max_complexity` is the largest per-file
/// average, truncated.
pub fn analyze_code(
    inventory: &Inventory,
    extensions: &BTreeSet<&str>,
    analyzer: &dyn FunctionAnalyzer,
    style: &CommentStyle,
) -> CodeMetrics {
    let mut files_analyzed = 0usize;
    let mut total_lines = 0usize;
    let mut code_lines = 0usize;
    let mut comment_lines = 0usize;
    let mut blank_lines = 0usize;
    let mut functions_count = 0usize;
    let mut distribution = ComplexityDistribution::default();
    let mut complexity_means = Vec::new();
    let mut length_means = Vec::new();

    for file in inventory.files() {
        let eligible = file
            .extension()
            .is_some_and(|extension| extensions.contains(extension.as_str()));
        if !eligible {
            continue;
        }

        let path = inventory.absolute(file);
        let content = match read_text_lossy(&path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %file.relative, error = %err, "skipping unreadable source file");
                continue;
            }
        };

        let lines = count_lines(&content, style);
        let stats = summarize(&analyzer.analyze(Path::new(&file.relative), &content));

        files_analyzed += 1;
        total_lines += lines.total;
        code_lines += lines.code;
        comment_lines += lines.comment;
        blank_lines += lines.blank;
        functions_count += stats.functions;
        distribution.merge(&stats.distribution);
        if stats.functions > 0 {
            complexity_means.push(stats.avg_complexity);
            length_means.push(stats.avg_function_length);
        }
    }

    let comment_ratio = if code_lines > 0 {
        comment_lines as f64 / code_lines as f64
    } else {
        0.0
    };
    let avg_file_length = if files_analyzed > 0 {
        total_lines as f64 / files_analyzed as f64
    } else {
        0.0
    };
    let max_complexity = complexity_means.iter().copied().fold(0.0, f64::max) as u32;

    CodeMetrics {
        total_lines,
        code_lines,
        comment_lines,
        blank_lines,
        avg_file_length: round_to(avg_file_length, 2),
        avg_function_length: round_to(mean(&length_means), 2),
        comment_ratio: round_to(comment_ratio, 3),
        files_analyzed,
        functions_count,
        avg_complexity: round_to(mean(&complexity_means), 2),
        max_complexity,
        complexity_distribution: distribution,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::catalog::{code_extensions_for, EXCLUDED_DIRS};
    use crate::scan::complexity::{FunctionComplexity, TreeSitterAnalyzer};
    use std::fs;
    use tempfile::TempDir;

    /// Reports fixed functions for `.py` files and nothing elsewhere.
    struct FixedAnalyzer;

    impl FunctionAnalyzer for FixedAnalyzer {
        fn analyze(&self, path: &Path, _source: &str) -> Vec<FunctionComplexity> {
            match path.file_name().and_then(|name| name.to_str()) {
                Some("a.py") => vec![
                    FunctionComplexity {
                        complexity: 2,
                        length: 4,
                    },
                    FunctionComplexity {
                        complexity: 4,
                        length: 8,
                    },
                ],
                Some("b.py") => vec![FunctionComplexity {
                    complexity: 21,
                    length: 30,
                }],
                _ => Vec::new(),
            }
        }
    }

    fn inventory(dir: &TempDir) -> Inventory {
        let excluded = EXCLUDED_DIRS.iter().map(|name| name.to_string()).collect();
        Inventory::build(dir.path(), &excluded)
    }

    #[test]
    fn single_file_with_comment_blank_and_code() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("main.py"), "# comment\n\ncode_line()\n").expect("write");

        let metrics = analyze_code(
            &inventory(&dir),
            &code_extensions_for(Some("python")),
            &TreeSitterAnalyzer,
            &CommentStyle::default(),
        );
        assert_eq!(metrics.files_analyzed, 1);
        assert_eq!(metrics.total_lines, 3);
        assert_eq!(metrics.blank_lines, 1);
        assert_eq!(metrics.comment_lines, 1);
        assert_eq!(metrics.code_lines, 1);
        assert_eq!(metrics.comment_ratio, 1.0);
        assert_eq!(metrics.functions_count, 0);
        assert_eq!(metrics.avg_complexity, 0.0);
    }

    #[test]
    fn complexity_is_mean_of_per_file_means() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("a.py"), "x = 1\n").expect("write a");
        fs::write(dir.path().join("b.py"), "y = 2\n").expect("write b");
        fs::write(dir.path().join("c.py"), "# nothing\n").expect("write c");

        let metrics = analyze_code(
            &inventory(&dir),
            &code_extensions_for(None),
            &FixedAnalyzer,
            &CommentStyle::default(),
        );
        assert_eq!(metrics.files_analyzed, 3);
        assert_eq!(metrics.functions_count, 3);
        // per-file means 3.0 and 21.0; c.py has no functions
        assert_eq!(metrics.avg_complexity, 12.0);
        assert_eq!(metrics.avg_function_length, 18.0);
        assert_eq!(metrics.max_complexity, 21);
        assert_eq!(metrics.complexity_distribution.low, 2);
        assert_eq!(metrics.complexity_distribution.very_high, 1);
        assert_eq!(metrics.avg_file_length, 1.0);
    }

    #[test]
    fn language_hint_narrows_eligible_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("a.py"), "x = 1\n").expect("write py");
        fs::write(dir.path().join("lib.rs"), "fn main() {}\n").expect("write rs");
        fs::write(dir.path().join("notes.md"), "# notes\n").expect("write md");

        let inventory = inventory(&dir);
        let style = CommentStyle::default();
        let python = analyze_code(&inventory, &code_extensions_for(Some("python")), &FixedAnalyzer, &style);
        let all = analyze_code(&inventory, &code_extensions_for(None), &FixedAnalyzer, &style);
        assert_eq!(python.files_analyzed, 1);
        assert_eq!(all.files_analyzed, 2);
    }

    #[test]
    fn no_code_means_zero_ratio() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("only.py"), "# a\n# b\n").expect("write");

        let metrics = analyze_code(
            &inventory(&dir),
            &code_extensions_for(None),
            &TreeSitterAnalyzer,
            &CommentStyle::default(),
        );
        assert_eq!(metrics.code_lines, 0);
        assert_eq!(metrics.comment_ratio, 0.0);
    }

    #[test]
    fn empty_repository_yields_default_metrics() {
        let dir = TempDir::new().expect("temp dir should be created");
        let metrics = analyze_code(
            &inventory(&dir),
            &code_extensions_for(None),
            &TreeSitterAnalyzer,
            &CommentStyle::default(),
        );
        assert_eq!(metrics, CodeMetrics::default());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_source_is_left_out_entirely() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("main.py"), "# comment\n\ncode_line()\n").expect("write");
        std::os::unix::fs::symlink("missing.py", dir.path().join("broken.py"))
            .expect("symlink should create");

        let inventory = inventory(&dir);
        assert!(inventory.contains("broken.py"));

        let metrics = analyze_code(
            &inventory,
            &code_extensions_for(Some("python")),
            &TreeSitterAnalyzer,
            &CommentStyle::default(),
        );
        assert_eq!(metrics.files_analyzed, 1);
        assert_eq!(metrics.total_lines, 3);
        assert_eq!(metrics.code_lines, 1);
        assert_eq!(metrics.avg_file_length, 3.0);
    }
}
