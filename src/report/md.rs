use crate::types::report::FinalOutput;

const BAR_WIDTH: usize = 30;
const ROADMAP_PREVIEW: usize = 5;

fn bar(percentage: f64) -> String {
    let filled = ((percentage * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn to_markdown(output: &FinalOutput) -> String {
    let repository = &output.metadata.repository;
    let mut out = String::new();

    out.push_str(&format!("# Repository Mirror: {}\n\n", repository.name));
    out.push_str(&format!("- Path: {}\n", repository.path));
    out.push_str(&format!(
        "- Language: {}\n",
        repository.primary_language.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!("- Snapshot: {}\n", repository.snapshot_digest));
    out.push_str(&format!(
        "- Analyzed at: {}\n\n",
        output.metadata.analyzed_at.to_rfc3339()
    ));

    out.push_str(&format!("**Overall score: {:.2}/100**\n\n", output.score));
    out.push_str(&format!("- Tier: {}\n", output.tier));
    out.push_str(&format!("- Confidence: {}\n\n", output.confidence));
    out.push_str(&output.summary);
    out.push_str("\n\n");

    out.push_str("## Dimension Scores\n\n");
    out.push_str("```\n");
    for detail in &output.metadata.dimensions {
        out.push_str(&format!(
            "{:<30} [{}] {:>3.0}% ({:.1}/100)\n",
            detail.name,
            bar(detail.percentage),
            detail.percentage * 100.0,
            detail.weighted_score
        ));
    }
    out.push_str("```\n\n");

    out.push_str("## Strengths\n\n");
    for (i, strength) in output.strengths.iter().enumerate() {
        out.push_str(&format!("{}. {strength}\n", i + 1));
    }
    out.push('\n');

    out.push_str("## Weaknesses\n\n");
    for (i, weakness) in output.weaknesses.iter().enumerate() {
        out.push_str(&format!("{}. {weakness}\n", i + 1));
    }
    out.push('\n');

    out.push_str("## Improvement Roadmap\n\n");
    if output.roadmap.is_empty() {
        out.push_str("- none\n");
    }
    for item in output.roadmap.iter().take(ROADMAP_PREVIEW) {
        out.push_str(&format!(
            "### Priority {} ({:?} effort, {:?} impact)\n\n{}\n\n_Rationale:_ {}\n\n",
            item.priority, item.effort, item.impact, item.action, item.rationale
        ));
    }

    out
}
