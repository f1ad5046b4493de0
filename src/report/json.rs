use crate::types::report::FinalOutput;

pub fn to_json(output: &FinalOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::empty_output;
    use serde_json::Value;

    #[test]
    fn json_document_keeps_field_names() {
        let rendered = to_json(&empty_output()).expect("json should serialize");
        let value: Value = serde_json::from_str(&rendered).expect("json should parse");

        assert_eq!(value["tier"], "Beginner");
        assert_eq!(value["confidence"], "Low");
        assert!(value["score"].is_number());
        assert_eq!(value["roadmap"][0]["priority"], 1);
        assert_eq!(value["roadmap"][0]["effort"], "Low");
        assert_eq!(value["metadata"]["metrics"]["total_files"], 0);
        assert_eq!(value["metadata"]["analyzed_at"], "2024-06-01T00:00:00Z");
        let dimensions = value["metadata"]["dimensions"]
            .as_array()
            .expect("dimensions should be a list");
        let names = dimensions
            .iter()
            .map(|dimension| dimension["name"].as_str().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "Code Quality",
                "Structure & Modularity",
                "Documentation",
                "Testing & Maintainability",
                "Git Practices",
                "Real-World Readiness",
            ]
        );
        let git = &dimensions[4];
        assert_eq!(git["reasoning"], "No commit history");
        assert_eq!(git["weight"], 0.1);
        let code = &dimensions[0];
        assert_eq!(code["signals"]["complexity"], "low");
        let docs = &dimensions[2];
        assert_eq!(docs["signals"]["readme"], false);
    }
}
