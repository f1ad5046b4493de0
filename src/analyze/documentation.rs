use crate::analyze::DimensionBuilder;
use crate::scan::catalog::DOC_EXTENSIONS;
use crate::types::metrics::FileStructure;
use crate::types::scoring::{Dimension, DimensionScore};

pub fn score(structure: &FileStructure, weight: f64) -> DimensionScore {
    let mut dim = DimensionBuilder::new(Dimension::Documentation);

    let readme = structure.has_key_file("readme");
    dim.flag("readme", readme);
    if readme {
        dim.add(40).reason("README present");
    } else {
        dim.reason("Missing README");
    }

    let license = structure.has_key_file("license");
    dim.flag("license", license);
    if license {
        dim.add(20).reason("LICENSE present");
    } else {
        dim.reason("Missing LICENSE");
    }

    let contributing = structure.has_key_file("contributing");
    dim.flag("contributing", contributing);
    if contributing {
        dim.add(15).reason("CONTRIBUTING guide present");
    }

    let changelog = structure.has_key_file("changelog");
    dim.flag("changelog", changelog);
    if changelog {
        dim.add(10).reason("CHANGELOG present");
    }

    let code_of_conduct = structure.has_key_file("code_of_conduct");
    dim.flag("code_of_conduct", code_of_conduct);
    if code_of_conduct {
        dim.add(10);
    }

    let doc_files: usize = structure
        .file_types
        .iter()
        .filter(|(extension, _)| DOC_EXTENSIONS.contains(&extension.as_str()))
        .map(|(_, count)| count)
        .sum();
    if doc_files >= 5 {
        dim.add(5).reason("Multiple documentation files");
    } else if doc_files >= 2 {
        dim.add(3);
    }

    dim.finish(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::Signal;

    fn with_key_files(present: &[&str], docs: usize) -> FileStructure {
        let mut structure = FileStructure::default();
        for category in ["readme", "license", "contributing", "changelog", "code_of_conduct"] {
            structure
                .key_files_present
                .insert(category.to_string(), present.contains(&category));
        }
        if docs > 0 {
            structure.file_types.insert(".md".to_string(), docs);
        }
        structure.file_types.insert(".py".to_string(), 12);
        structure
    }

    #[test]
    fn every_document_scores_full_marks() {
        let all = ["readme", "license", "contributing", "changelog", "code_of_conduct"];
        let score = score(&with_key_files(&all, 6), 0.15);
        assert_eq!(score.score, 100.0);
        assert_eq!(score.weighted_score, 15.0);
        assert_eq!(score.signals.get("code_of_conduct"), Some(&Signal::Flag(true)));
    }

    #[test]
    fn missing_readme_and_license_are_called_out() {
        let score = score(&with_key_files(&[], 0), 0.15);
        assert_eq!(score.score, 0.0);
        assert_eq!(score.reasoning, "Missing README; Missing LICENSE");
        assert_eq!(score.signals.get("readme"), Some(&Signal::Flag(false)));
    }

    #[test]
    fn a_few_doc_files_add_a_little() {
        let score = score(&with_key_files(&["readme"], 2), 0.15);
        assert_eq!(score.score, 43.0);
    }
}
