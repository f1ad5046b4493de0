use crate::scan::catalog::{all_code_extensions, EXCLUDED_EXTENSIONS, KEY_FILES};
use crate::scan::filesystem::Inventory;
use crate::types::metrics::{round_to, FileStructure, LargeFile};
use std::cmp::Reverse;
use std::collections::BTreeMap;

const LARGEST_FILES: usize = 10;
const NO_EXTENSION: &str = "no_extension";

/// Shape of the tree: counts, depth, file-type histogram, key files and the largest files.
pub fn analyze_structure(inventory: &Inventory) -> FileStructure {
    let code_extensions = all_code_extensions();
    let mut total_files = 0usize;
    let mut total_code_files = 0usize;
    let mut depth_sum = 0usize;
    let mut max_depth = 0usize;
    let mut file_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut sized = Vec::new();

    for file in inventory.files() {
        let extension = file.extension();
        if extension
            .as_deref()
            .is_some_and(|ext| EXCLUDED_EXTENSIONS.contains(&ext))
        {
            continue;
        }

        total_files += 1;
        let depth = file.depth();
        depth_sum += depth;
        max_depth = max_depth.max(depth);

        if extension
            .as_deref()
            .is_some_and(|ext| code_extensions.contains(ext))
        {
            total_code_files += 1;
        }
        let key = extension.unwrap_or_else(|| NO_EXTENSION.to_string());
        *file_types.entry(key).or_default() += 1;

        if let Some(size) = file.size {
            sized.push(LargeFile {
                path: file.relative.clone(),
                size,
            });
        }
    }

    sized.sort_by(|a, b| (Reverse(a.size), &a.path).cmp(&(Reverse(b.size), &b.path)));
    sized.truncate(LARGEST_FILES);

    let avg_depth = if total_files > 0 {
        depth_sum as f64 / total_files as f64
    } else {
        0.0
    };

    let key_files_present = KEY_FILES
        .iter()
        .map(|(category, names)| {
            let present = names.iter().any(|name| inventory.contains(name));
            (category.to_string(), present)
        })
        .collect();

    FileStructure {
        total_files,
        total_code_files,
        max_depth,
        avg_depth: round_to(avg_depth, 2),
        directories: inventory.dirs().len(),
        key_files_present,
        file_types,
        largest_files: sized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::filesystem::InventoryFile;
    use std::path::Path;

    fn file(relative: &str, size: u64) -> InventoryFile {
        InventoryFile {
            relative: relative.to_string(),
            size: Some(size),
        }
    }

    #[test]
    fn empty_inventory_has_zero_files() {
        let inventory = Inventory::from_parts(Path::new("/repo"), Vec::new(), Vec::new());
        let structure = analyze_structure(&inventory);
        assert_eq!(structure.total_files, 0);
        assert_eq!(structure.avg_depth, 0.0);
        assert!(!structure.has_key_file("readme"));
        assert_eq!(structure.key_files_present.len(), KEY_FILES.len());
    }

    #[test]
    fn counts_depth_types_and_key_files() {
        let inventory = Inventory::from_parts(
            Path::new("/repo"),
            vec!["src".into(), "src/core".into(), "docs".into()],
            vec![
                file("README.md", 120),
                file(".gitignore", 10),
                file("LICENSE", 900),
                file("src/main.py", 400),
                file("src/core/engine.py", 2_000),
                file("docs/logo.png", 50_000),
                file("docs/guide.md", 400),
            ],
        );

        let structure = analyze_structure(&inventory);
        assert_eq!(structure.total_files, 6);
        assert_eq!(structure.total_code_files, 2);
        assert_eq!(structure.max_depth, 2);
        // depths 0,0,0,1,2,1
        assert_eq!(structure.avg_depth, 0.67);
        assert_eq!(structure.directories, 3);
        assert_eq!(structure.file_types.get(".md"), Some(&2));
        assert_eq!(structure.file_types.get(".py"), Some(&2));
        assert_eq!(structure.file_types.get("no_extension"), Some(&2));
        assert!(!structure.file_types.contains_key(".png"));
        assert!(structure.has_key_file("readme"));
        assert!(structure.has_key_file("license"));
        assert!(structure.has_key_file("gitignore"));
        assert!(!structure.has_key_file("changelog"));

        let largest = structure
            .largest_files
            .iter()
            .map(|f| f.path.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            largest,
            vec![
                "src/core/engine.py",
                "LICENSE",
                "docs/guide.md",
                "src/main.py",
                "README.md",
                ".gitignore"
            ]
        );
    }

    #[test]
    fn key_files_are_only_found_at_the_root() {
        let inventory = Inventory::from_parts(
            Path::new("/repo"),
            vec!["pkg".into()],
            vec![file("pkg/README.md", 10)],
        );
        assert!(!analyze_structure(&inventory).has_key_file("readme"));
    }
}
