//! Presence detectors for tests, CI, linters, packaging and deployment, plus
//! the sampled error-handling score. All of them read the shared inventory.

use crate::scan::catalog::{
    all_code_extensions, language_entries, CI_CD_PATHS, CONFIG_EXAMPLES, DEPLOYMENT_DIRS,
    DEPLOYMENT_FILES, LINTER_CONFIGS, PACKAGE_MANAGERS, REAL_WORLD_INDICATORS, TEST_INDICATORS,
};
use crate::scan::filesystem::{read_text_lossy, Inventory};
use crate::types::metrics::{round_to, MaturityMetrics, TestingMetrics};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

static ERROR_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn error_patterns() -> &'static [Regex] {
    ERROR_PATTERNS.get_or_init(|| {
        [
            r"\btry\b",
            r"\bcatch\b",
            r"\bexcept\b",
            r"\bfinally\b",
            r"\bthrow\b",
            r"\braise\b",
            r"\.catch\(",
            r"\.then\(",
            r"\bError\b",
            r"\bException\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
    })
}

/// True when the text contains any error-handling construct.
pub fn has_error_handling(content: &str) -> bool {
    error_patterns().iter().any(|pattern| pattern.is_match(content))
}

fn is_test_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    TEST_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

fn basename(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

fn present_entries(inventory: &Inventory, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| inventory.contains(candidate))
        .map(|candidate| candidate.to_string())
        .collect()
}

pub fn analyze_testing(inventory: &Inventory, language: Option<&str>) -> TestingMetrics {
    let has_test_directory = inventory
        .dirs()
        .iter()
        .any(|dir| is_test_name(basename(dir)));
    let test_files_count = inventory
        .files()
        .iter()
        .filter(|file| is_test_name(file.file_name()))
        .count();

    let code_extensions = all_code_extensions();
    let code_files = inventory
        .files()
        .iter()
        .filter(|file| {
            file.extension()
                .is_some_and(|ext| code_extensions.contains(ext.as_str()))
        })
        .count();
    let test_to_code_ratio = if code_files > 0 {
        (test_files_count as f64 / code_files as f64).min(1.0)
    } else {
        0.0
    };

    let ci_cd_tools = CI_CD_PATHS
        .iter()
        .filter(|(path, _)| inventory.contains(path))
        .map(|(_, tool)| tool.to_string())
        .collect::<Vec<_>>();
    let linter_tools = present_entries(inventory, &language_entries(LINTER_CONFIGS, language));

    TestingMetrics {
        has_test_directory,
        test_files_count,
        test_to_code_ratio: round_to(test_to_code_ratio, 3),
        has_ci_cd: !ci_cd_tools.is_empty(),
        ci_cd_tools,
        has_linter_config: !linter_tools.is_empty(),
        linter_tools,
    }
}

pub fn analyze_maturity(
    inventory: &Inventory,
    language: Option<&str>,
    error_sample_limit: usize,
) -> MaturityMetrics {
    let package_managers =
        present_entries(inventory, &language_entries(PACKAGE_MANAGERS, language));

    let mut deployment_tools = present_entries(inventory, DEPLOYMENT_FILES);
    deployment_tools.extend(
        DEPLOYMENT_DIRS
            .iter()
            .filter(|dir| inventory.has_dir(dir))
            .map(|dir| format!("{dir}/")),
    );

    MaturityMetrics {
        has_package_manager: !package_managers.is_empty(),
        package_managers,
        has_config_example: CONFIG_EXAMPLES.iter().any(|name| inventory.contains(name)),
        has_deployment_config: !deployment_tools.is_empty(),
        deployment_tools,
        real_world_features: detect_features(inventory),
        error_handling_score: error_handling_score(inventory, error_sample_limit),
    }
}

/// A category is present when any indicator is a case-insensitive substring of any relative path.
fn detect_features(inventory: &Inventory) -> BTreeMap<String, bool> {
    let paths = inventory
        .dirs()
        .iter()
        .map(|dir| dir.to_lowercase())
        .chain(inventory.files().iter().map(|file| file.relative.to_lowercase()))
        .collect::<Vec<_>>();

    REAL_WORLD_INDICATORS
        .iter()
        .map(|(category, indicators)| {
            let present = indicators.iter().any(|indicator| {
                let needle = indicator.to_lowercase();
                paths.iter().any(|path| path.contains(&needle))
            });
            (category.to_string(), present)
        })
        .collect()
}

/// Share of sampled source files containing error handling.
///
/// The sample is the first `limit` inventory entries in path order, narrowed to
/// source extensions afterwards. Unreadable files leave the denominator.
fn error_handling_score(inventory: &Inventory, limit: usize) -> f64 {
    let code_extensions = all_code_extensions();
    let mut sampled = 0usize;
    let mut handled = 0usize;

    for file in inventory.files().iter().take(limit) {
        let is_code = file
            .extension()
            .is_some_and(|ext| code_extensions.contains(ext.as_str()));
        if !is_code {
            continue;
        }
        let content = match read_text_lossy(&inventory.absolute(file)) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %file.relative, error = %err, "error-handling sample skipped");
                continue;
            }
        };
        sampled += 1;
        if has_error_handling(&content) {
            handled += 1;
        }
    }

    if sampled == 0 {
        return 0.0;
    }
    round_to(handled as f64 / sampled as f64, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::catalog::EXCLUDED_DIRS;
    use crate::scan::filesystem::InventoryFile;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn listed(dirs: &[&str], files: &[&str]) -> Inventory {
        Inventory::from_parts(
            Path::new("/repo"),
            dirs.iter().map(|d| d.to_string()).collect(),
            files
                .iter()
                .map(|f| InventoryFile {
                    relative: f.to_string(),
                    size: Some(1),
                })
                .collect(),
        )
    }

    fn built(dir: &TempDir) -> Inventory {
        let excluded = EXCLUDED_DIRS.iter().map(|name| name.to_string()).collect();
        Inventory::build(dir.path(), &excluded)
    }

    #[test]
    fn error_patterns_respect_word_boundaries() {
        assert!(has_error_handling("try:\n    pass\nexcept ValueError:\n    pass"));
        assert!(has_error_handling("fetch(url).then(render)"));
        assert!(has_error_handling("return Err(Error::Io)"));
        assert!(!has_error_handling("let entry = retry_count;"));
        assert!(!has_error_handling("errors are lowercase here"));
        assert!(!has_error_handling("MyErrorType is not a match"));
    }

    #[test]
    fn testing_detects_tests_ci_and_linters() {
        let inventory = listed(
            &[".github", ".github/workflows", "src", "tests"],
            &[
                ".github/workflows/ci.yml",
                ".travis.yml",
                "rustfmt.toml",
                "src/lib.rs",
                "src/main.rs",
                "tests/cli_test.rs",
                "tests/fixtures.json",
            ],
        );

        let testing = analyze_testing(&inventory, Some("rust"));
        assert!(testing.has_test_directory);
        assert_eq!(testing.test_files_count, 1);
        // 1 test file over 3 source files
        assert_eq!(testing.test_to_code_ratio, 0.333);
        assert_eq!(testing.ci_cd_tools, vec!["GitHub Actions", "Travis CI"]);
        assert_eq!(testing.linter_tools, vec!["rustfmt.toml"]);

        let python = analyze_testing(&inventory, Some("python"));
        assert!(!python.has_linter_config);
    }

    #[test]
    fn test_ratio_is_clamped_to_one() {
        let inventory = listed(&[], &["test_a.txt", "test_b.txt", "spec.md", "main.py"]);
        let testing = analyze_testing(&inventory, None);
        assert_eq!(testing.test_files_count, 3);
        assert_eq!(testing.test_to_code_ratio, 1.0);
    }

    #[test]
    fn maturity_detects_packaging_deployment_and_features() {
        let inventory = listed(
            &["k8s", "src", "src/api", "src/models"],
            &[
                "Dockerfile",
                "package.json",
                ".env.example",
                "src/api/routes.js",
                "src/models/user.js",
            ],
        );

        let maturity = analyze_maturity(&inventory, Some("Klingon"), 100);
        assert_eq!(maturity.package_managers, vec!["package.json"]);
        assert!(maturity.has_config_example);
        assert_eq!(maturity.deployment_tools, vec!["Dockerfile", "k8s/"]);
        assert_eq!(maturity.real_world_features.get("api"), Some(&true));
        assert_eq!(maturity.real_world_features.get("database"), Some(&true));
        assert_eq!(maturity.real_world_features.get("deployment"), Some(&true));
        assert_eq!(maturity.real_world_features.get("auth"), Some(&false));
        assert_eq!(maturity.feature_count(), 3);
    }

    #[test]
    fn empty_inventory_has_no_maturity_signals() {
        let inventory = listed(&[], &[]);
        let maturity = analyze_maturity(&inventory, None, 100);
        assert!(!maturity.has_package_manager);
        assert!(!maturity.has_deployment_config);
        assert_eq!(maturity.feature_count(), 0);
        assert_eq!(maturity.error_handling_score, 0.0);
        assert_eq!(maturity.real_world_features.len(), REAL_WORLD_INDICATORS.len());
    }

    #[test]
    fn error_score_samples_in_path_order_up_to_limit() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("a.py"), "try:\n    x()\nexcept Exception:\n    pass\n")
            .expect("write a");
        fs::write(dir.path().join("b.md"), "try this").expect("write b");
        fs::write(dir.path().join("c.py"), "x = 1\n").expect("write c");
        fs::write(dir.path().join("d.py"), "raise SystemExit\n").expect("write d");

        let inventory = built(&dir);
        // all three sources: a and d handle errors
        assert_eq!(analyze_maturity(&inventory, None, 100).error_handling_score, 0.67);
        // first three entries are a.py, b.md, c.py; only two are sources
        assert_eq!(analyze_maturity(&inventory, None, 3).error_handling_score, 0.5);
        // the markdown file is never sampled
        assert_eq!(analyze_maturity(&inventory, None, 2).error_handling_score, 1.0);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_sources_leave_the_error_sample() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("a.py"), "raise SystemExit\n").expect("write a");
        std::os::unix::fs::symlink("missing.py", dir.path().join("broken.py"))
            .expect("symlink should create");
        fs::write(dir.path().join("c.py"), "x = 1\n").expect("write c");

        // a.py handled, broken.py skipped, c.py not handled
        let inventory = built(&dir);
        assert_eq!(inventory.files().len(), 3);
        assert_eq!(analyze_maturity(&inventory, None, 100).error_handling_score, 0.5);
    }
}
