pub mod json;
pub mod md;

use crate::error::MirrorError;
use crate::types::report::FinalOutput;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(output: &FinalOutput, format: OutputFormat) -> Result<String, MirrorError> {
    match format {
        OutputFormat::Json => json::to_json(output).map_err(MirrorError::Json),
        OutputFormat::Md => Ok(md::to_markdown(output)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::analyze::{analyze, insights, tests::empty_model};
    use crate::types::config::Settings;
    use crate::types::report::FinalOutput;
    use chrono::{DateTime, Utc};

    pub(crate) fn empty_output() -> FinalOutput {
        let evaluated_at = DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let analysis = analyze(&empty_model(), &Settings::default(), evaluated_at);
        FinalOutput::new(
            &analysis,
            insights::summary(&analysis),
            insights::roadmap(&analysis),
        )
    }
}
