//! Fixed vocabularies consulted by the detectors.
//!
//! Language keys are lower-case; a language hint that is not present in a
//! table falls back to the union of every entry.

use std::collections::BTreeSet;

pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".mirror",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    "venv",
    "env",
    ".venv",
    "virtualenv",
    "dist",
    "build",
    "target",
    "out",
    ".idea",
    ".vscode",
    ".DS_Store",
    "coverage",
    ".nyc_output",
    "vendor",
];

/// Extensions dropped from the structure view (binaries, media, archives, lock and log files).
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".pyd", ".so", ".dll", ".dylib", ".exe", ".bin", ".dat", ".db", ".sqlite",
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".pdf", ".zip", ".tar", ".gz", ".rar",
    ".lock", ".log", ".tmp", ".cache",
];

pub const CODE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("python", &[".py"]),
    ("javascript", &[".js", ".jsx", ".mjs", ".cjs"]),
    ("typescript", &[".ts", ".tsx"]),
    ("java", &[".java"]),
    ("cpp", &[".cpp", ".cc", ".cxx", ".h", ".hpp"]),
    ("c", &[".c", ".h"]),
    ("csharp", &[".cs"]),
    ("go", &[".go"]),
    ("rust", &[".rs"]),
    ("ruby", &[".rb"]),
    ("php", &[".php"]),
    ("swift", &[".swift"]),
    ("kotlin", &[".kt", ".kts"]),
];

pub const DOC_EXTENSIONS: &[&str] = &[".md", ".rst", ".txt"];

pub const KEY_FILES: &[(&str, &[&str])] = &[
    ("readme", &["README.md", "readme.md", "README.rst", "README.txt"]),
    ("license", &["LICENSE", "LICENSE.md", "LICENSE.txt", "COPYING"]),
    ("gitignore", &[".gitignore"]),
    ("contributing", &["CONTRIBUTING.md", "CONTRIBUTING.rst"]),
    ("changelog", &["CHANGELOG.md", "CHANGELOG.rst", "HISTORY.md"]),
    ("code_of_conduct", &["CODE_OF_CONDUCT.md"]),
];

pub const TEST_INDICATORS: &[&str] = &[
    "test", "tests", "__tests__", "spec", "specs", "test_", "_test", ".test.", ".spec.",
];

pub const PACKAGE_MANAGERS: &[(&str, &[&str])] = &[
    (
        "python",
        &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile", "poetry.lock"],
    ),
    (
        "javascript",
        &["package.json", "package-lock.json", "yarn.lock", "pnpm-lock.yaml"],
    ),
    ("ruby", &["Gemfile", "Gemfile.lock"]),
    ("java", &["pom.xml", "build.gradle", "build.gradle.kts"]),
    ("go", &["go.mod", "go.sum"]),
    ("rust", &["Cargo.toml", "Cargo.lock"]),
    ("php", &["composer.json", "composer.lock"]),
];

pub const LINTER_CONFIGS: &[(&str, &[&str])] = &[
    (
        "python",
        &[".pylintrc", "pylint.rc", ".flake8", "setup.cfg", "tox.ini", ".ruff.toml"],
    ),
    (
        "javascript",
        &[".eslintrc", ".eslintrc.js", ".eslintrc.json", ".eslintrc.yml", "eslint.config.js"],
    ),
    ("typescript", &["tsconfig.json", "tslint.json"]),
    ("ruby", &[".rubocop.yml"]),
    ("go", &[".golangci.yml", ".golangci.yaml"]),
    ("rust", &["rustfmt.toml", ".rustfmt.toml", "clippy.toml", ".clippy.toml"]),
];

pub const CONFIG_EXAMPLES: &[&str] = &[
    ".env.example",
    ".env.sample",
    ".env.template",
    "config.example.js",
    "config.example.json",
    "config.sample.js",
    "config.sample.json",
];

/// Relative path (file or directory) → CI/CD tool name.
pub const CI_CD_PATHS: &[(&str, &str)] = &[
    (".github/workflows", "GitHub Actions"),
    (".gitlab-ci.yml", "GitLab CI"),
    (".travis.yml", "Travis CI"),
    ("Jenkinsfile", "Jenkins"),
    (".circleci", "CircleCI"),
    ("azure-pipelines.yml", "Azure Pipelines"),
    (".drone.yml", "Drone CI"),
    ("bitbucket-pipelines.yml", "Bitbucket Pipelines"),
];

pub const DEPLOYMENT_FILES: &[&str] = &[
    "Dockerfile",
    "docker-compose.yml",
    ".dockerignore",
    "Procfile",
    "app.yaml",
    "app.yml",
    "Makefile",
    "deploy.sh",
    "deployment.yaml",
];

pub const DEPLOYMENT_DIRS: &[&str] = &["k8s", "kubernetes"];

pub const REAL_WORLD_INDICATORS: &[(&str, &[&str])] = &[
    ("api", &["api", "routes", "controllers", "endpoints", "rest", "graphql"]),
    ("database", &["models", "migrations", "schema", "database", "db"]),
    (
        "auth",
        &["auth", "authentication", "authorization", "login", "jwt", "oauth"],
    ),
    (
        "deployment",
        &["Dockerfile", "docker-compose.yml", ".dockerignore", "k8s", "kubernetes"],
    ),
    (
        "ci_cd",
        &[".github/workflows", ".gitlab-ci.yml", ".travis.yml", "Jenkinsfile", ".circleci"],
    ),
];

/// Entries for `language`, or the union of every language when the hint is absent or unknown.
/// Union order follows the table order with duplicates removed.
pub fn language_entries(
    table: &[(&str, &'static [&'static str])],
    language: Option<&str>,
) -> Vec<&'static str> {
    if let Some(language) = language {
        if let Some((_, entries)) = table.iter().find(|(key, _)| *key == language) {
            return entries.to_vec();
        }
    }

    let mut seen = BTreeSet::new();
    table
        .iter()
        .flat_map(|(_, entries)| entries.iter().copied())
        .filter(|entry| seen.insert(*entry))
        .collect()
}

/// Every known source extension, regardless of language.
pub fn all_code_extensions() -> BTreeSet<&'static str> {
    CODE_EXTENSIONS
        .iter()
        .flat_map(|(_, extensions)| extensions.iter().copied())
        .collect()
}

/// Source extensions for the language hint, or every known extension.
pub fn code_extensions_for(language: Option<&str>) -> BTreeSet<&'static str> {
    language_entries(CODE_EXTENSIONS, language)
        .into_iter()
        .collect()
}
