use crate::analyze::{percent, DimensionBuilder};
use crate::types::metrics::CodeMetrics;
use crate::types::scoring::{Dimension, DimensionScore};

const BASELINE: i32 = 10;
const HIGH_COMPLEXITY_SHARE: f64 = 0.2;

pub fn score(metrics: &CodeMetrics, weight: f64) -> DimensionScore {
    let mut dim = DimensionBuilder::new(Dimension::CodeQuality);

    let ratio = metrics.comment_ratio;
    if ratio >= 0.15 {
        dim.add(25)
            .level("comment_ratio", "excellent")
            .reason(format!("Good comment ratio ({})", percent(ratio)));
    } else if ratio >= 0.08 {
        dim.add(15)
            .level("comment_ratio", "adequate")
            .reason(format!("Adequate comment ratio ({})", percent(ratio)));
    } else {
        dim.add(5)
            .level("comment_ratio", "poor")
            .reason(format!("Low comment ratio ({})", percent(ratio)));
    }

    let complexity = metrics.avg_complexity;
    if complexity <= 5.0 {
        dim.add(30)
            .level("complexity", "low")
            .reason(format!("Low average complexity ({complexity:.1})"));
    } else if complexity <= 10.0 {
        dim.add(20)
            .level("complexity", "moderate")
            .reason(format!("Moderate complexity ({complexity:.1})"));
    } else {
        dim.add(10)
            .level("complexity", "high")
            .reason(format!("High complexity ({complexity:.1})"));
    }

    let file_length = metrics.avg_file_length;
    if file_length <= 300.0 {
        dim.add(20)
            .level("file_length", "optimal")
            .reason(format!("Good file length ({file_length:.0} lines)"));
    } else if file_length <= 500.0 {
        dim.add(12).level("file_length", "acceptable");
    } else {
        dim.add(5)
            .level("file_length", "long")
            .reason(format!("Files are long ({file_length:.0} lines avg)"));
    }

    let function_length = metrics.avg_function_length;
    if function_length <= 30.0 {
        dim.add(15)
            .level("function_length", "optimal")
            .reason("Functions are concise");
    } else if function_length <= 50.0 {
        dim.add(10).level("function_length", "acceptable");
    } else {
        dim.add(3)
            .level("function_length", "long")
            .reason(format!("Functions are long ({function_length:.0} lines)"));
    }

    if metrics.max_complexity > 20 {
        dim.add(-10).reason(format!(
            "Some functions are very complex (max: {})",
            metrics.max_complexity
        ));
    }

    let complex_functions = metrics.complexity_distribution.high_or_worse() as f64;
    if complex_functions > metrics.functions_count as f64 * HIGH_COMPLEXITY_SHARE {
        dim.add(-5).reason("Many functions have high complexity");
    }

    dim.add(BASELINE);
    dim.finish(weight)
}
