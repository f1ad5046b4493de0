use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFile {
    /// Path relative to the repository root, `/`-separated.
    pub relative: String,
    pub size: Option<u64>,
}

impl InventoryFile {
    pub fn file_name(&self) -> &str {
        self.relative
            .rsplit('/')
            .next()
            .unwrap_or(self.relative.as_str())
    }

    /// Extension including the leading dot, as `Path::extension` sees it (`.gitignore` has none).
    pub fn extension(&self) -> Option<String> {
        Path::new(self.file_name())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
    }

    /// Number of directories between the root and the file.
    pub fn depth(&self) -> usize {
        self.relative.matches('/').count()
    }
}

/// Every non-excluded directory and file under a root, in lexicographic order of relative path.
///
/// Built once per run and shared read-only by every detector.
#[derive(Debug, Clone)]
pub struct Inventory {
    root: PathBuf,
    dirs: Vec<String>,
    files: Vec<InventoryFile>,
    known_paths: HashSet<String>,
}

impl Inventory {
    pub fn build(root: &Path, excluded: &BTreeSet<String>) -> Self {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, excluded));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable inventory entry");
                    continue;
                }
            };
            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };

            let is_dir = entry.file_type().is_dir()
                || (entry.file_type().is_symlink() && entry.path().is_dir());
            if is_dir {
                dirs.push(relative);
            } else {
                let size = entry.metadata().ok().map(|metadata| metadata.len());
                files.push(InventoryFile { relative, size });
            }
        }

        Self::from_parts(root, dirs, files)
    }

    pub(crate) fn from_parts(root: &Path, mut dirs: Vec<String>, mut files: Vec<InventoryFile>) -> Self {
        dirs.sort();
        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        let known_paths = dirs
            .iter()
            .cloned()
            .chain(files.iter().map(|file| file.relative.clone()))
            .collect();
        Self {
            root: root.to_path_buf(),
            dirs,
            files,
            known_paths,
        }
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn files(&self) -> &[InventoryFile] {
        &self.files
    }

    /// True if a file or directory exists at `relative`.
    pub fn contains(&self, relative: &str) -> bool {
        self.known_paths.contains(relative)
    }

    pub fn has_dir(&self, relative: &str) -> bool {
        self.dirs.iter().any(|dir| dir == relative)
    }

    pub fn absolute(&self, file: &InventoryFile) -> PathBuf {
        self.root.join(&file.relative)
    }

    /// sha256 over `path\tsize` lines of every file, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for file in &self.files {
            hasher.update(file.relative.as_bytes());
            hasher.update(b"\t");
            hasher.update(file.size.unwrap_or(0).to_string().as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

fn is_excluded(entry: &DirEntry, excluded: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| excluded.contains(name))
            .unwrap_or(false)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Read a file as text, dropping invalid UTF-8 sequences instead of failing.
pub fn read_text_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::catalog::EXCLUDED_DIRS;
    use std::fs;
    use tempfile::TempDir;

    fn default_excluded() -> BTreeSet<String> {
        EXCLUDED_DIRS.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn build_prunes_excluded_directories_and_sorts_paths() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("src/nested")).expect("src should create");
        fs::create_dir_all(dir.path().join("node_modules/pkg")).expect("deps should create");
        fs::create_dir_all(dir.path().join(".git")).expect(".git should create");
        fs::write(dir.path().join("src/nested/z.py"), "z = 1\n").expect("z should write");
        fs::write(dir.path().join("src/a.py"), "a = 1\n").expect("a should write");
        fs::write(dir.path().join("node_modules/pkg/index.js"), "x").expect("dep should write");
        fs::write(dir.path().join(".git/HEAD"), "ref").expect("head should write");
        fs::write(dir.path().join("README.md"), "# readme").expect("readme should write");

        let inventory = Inventory::build(dir.path(), &default_excluded());
        let files = inventory
            .files()
            .iter()
            .map(|file| file.relative.as_str())
            .collect::<Vec<_>>();
        assert_eq!(files, vec!["README.md", "src/a.py", "src/nested/z.py"]);
        assert_eq!(inventory.dirs(), &["src".to_string(), "src/nested".to_string()]);
        assert!(inventory.contains("src/nested"));
        assert!(inventory.has_dir("src"));
        assert!(!inventory.has_dir("README.md"));
    }

    #[test]
    fn build_skips_the_tools_own_state_directory() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join(".mirror/roadmaps")).expect("state dir should create");
        fs::write(dir.path().join(".mirror/local.toml"), "[project]\n").expect("local should write");
        fs::write(dir.path().join(".mirror/roadmaps/roadmap-1.json"), "{}").expect("export should write");
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").expect("main should write");

        let with_state = Inventory::build(dir.path(), &default_excluded());
        assert_eq!(with_state.files().len(), 1);
        assert!(with_state.dirs().is_empty());

        fs::remove_dir_all(dir.path().join(".mirror")).expect("state dir should remove");
        let without_state = Inventory::build(dir.path(), &default_excluded());
        assert_eq!(with_state.digest(), without_state.digest());
    }

    #[test]
    fn inventory_file_reports_extension_and_depth() {
        let file = InventoryFile {
            relative: "pkg/sub/.gitignore".to_string(),
            size: Some(3),
        };
        assert_eq!(file.file_name(), ".gitignore");
        assert_eq!(file.extension(), None);
        assert_eq!(file.depth(), 2);

        let file = InventoryFile {
            relative: "archive.tar.gz".to_string(),
            size: None,
        };
        assert_eq!(file.extension().as_deref(), Some(".gz"));
        assert_eq!(file.depth(), 0);
    }

    #[test]
    fn digest_is_stable_for_identical_trees() {
        let first = TempDir::new().expect("temp dir should be created");
        let second = TempDir::new().expect("temp dir should be created");
        for root in [first.path(), second.path()] {
            fs::create_dir_all(root.join("lib")).expect("lib should create");
            fs::write(root.join("lib/mod.rs"), "fn main() {}\n").expect("file should write");
        }

        let excluded = default_excluded();
        let a = Inventory::build(first.path(), &excluded);
        let b = Inventory::build(second.path(), &excluded);
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);

        fs::write(second.path().join("lib/extra.rs"), "").expect("extra should write");
        let c = Inventory::build(second.path(), &excluded);
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn read_text_lossy_drops_invalid_bytes() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("mixed.py");
        fs::write(&path, b"ok = 1\n\xff\xfebad\n").expect("file should write");
        let text = read_text_lossy(&path).expect("read should succeed");
        assert_eq!(text, "ok = 1\nbad\n");
    }
}
