use crate::analyze::{percent, DimensionBuilder};
use crate::types::metrics::{CodeMetrics, TestingMetrics};
use crate::types::scoring::{Dimension, DimensionScore};

pub fn score(testing: &TestingMetrics, code: &CodeMetrics, weight: f64) -> DimensionScore {
    let mut dim = DimensionBuilder::new(Dimension::TestingMaintainability);

    dim.flag("test_directory", testing.has_test_directory);
    if testing.has_test_directory {
        dim.add(25).reason("Test directory present");
    } else {
        dim.reason("No test directory found");
    }

    let ratio = testing.test_to_code_ratio;
    if ratio >= 0.3 {
        dim.add(25)
            .level("test_coverage", "excellent")
            .reason(format!("High test coverage ({})", percent(ratio)));
    } else if ratio >= 0.15 {
        dim.add(15)
            .level("test_coverage", "good")
            .reason(format!("Moderate test coverage ({})", percent(ratio)));
    } else if ratio > 0.0 {
        dim.add(8)
            .level("test_coverage", "low")
            .reason(format!("Low test coverage ({})", percent(ratio)));
    } else {
        dim.level("test_coverage", "none").reason("No tests detected");
    }

    dim.flag("ci_cd", testing.has_ci_cd);
    if testing.has_ci_cd {
        dim.add(20).reason(format!(
            "CI/CD configured ({})",
            testing.ci_cd_tools.join(", ")
        ));
    } else {
        dim.reason("No CI/CD configuration");
    }

    dim.flag("linter", testing.has_linter_config);
    if testing.has_linter_config {
        dim.add(15).reason("Linter configured");
    } else {
        dim.reason("No linter configuration");
    }

    if code.avg_complexity <= 8.0 {
        dim.add(15)
            .level("maintainability", "high")
            .reason("Low complexity improves maintainability");
    } else if code.avg_complexity <= 15.0 {
        dim.add(10).level("maintainability", "moderate");
    } else {
        dim.add(5)
            .level("maintainability", "low")
            .reason("High complexity reduces maintainability");
    }

    dim.finish(weight)
}
