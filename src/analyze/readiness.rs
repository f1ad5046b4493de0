use crate::analyze::DimensionBuilder;
use crate::types::metrics::{FileStructure, MaturityMetrics};
use crate::types::scoring::{Dimension, DimensionScore};

pub fn score(maturity: &MaturityMetrics, structure: &FileStructure, weight: f64) -> DimensionScore {
    let mut dim = DimensionBuilder::new(Dimension::RealWorldReadiness);

    dim.flag("package_manager", maturity.has_package_manager);
    if maturity.has_package_manager {
        dim.add(25).reason(format!(
            "Package manager configured ({})",
            maturity.package_managers.join(", ")
        ));
    } else {
        dim.reason("No package manager detected");
    }

    let gitignore = structure.has_key_file("gitignore");
    dim.flag("gitignore", gitignore);
    if gitignore {
        dim.add(10);
    } else {
        dim.reason("Missing .gitignore");
    }

    dim.flag("config_example", maturity.has_config_example);
    if maturity.has_config_example {
        dim.add(15).reason("Configuration examples provided");
    } else {
        dim.reason("No config examples");
    }

    let features = maturity.feature_count();
    match features {
        3.. => {
            dim.add(25)
                .level("features", "production_ready")
                .reason(format!("Production features detected ({features})"));
        }
        2 => {
            dim.add(18)
                .level("features", "intermediate")
                .reason("Some production features");
        }
        1 => {
            dim.add(10).level("features", "basic");
        }
        0 => {
            dim.level("features", "minimal")
                .reason("Few production features");
        }
    }

    let handling = maturity.error_handling_score;
    if handling >= 0.6 {
        dim.add(15)
            .level("error_handling", "excellent")
            .reason("Strong error handling");
    } else if handling >= 0.3 {
        dim.add(10).level("error_handling", "adequate");
    } else if handling > 0.0 {
        dim.add(5).level("error_handling", "minimal");
    } else {
        dim.level("error_handling", "none")
            .reason("No error handling detected");
    }

    dim.flag("deployment", maturity.has_deployment_config);
    if maturity.has_deployment_config {
        dim.add(10).reason("Deployment configuration present");
    }

    dim.finish(weight)
}
