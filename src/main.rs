mod analyze;
mod cli;
mod config;
mod error;
mod generator;
mod report;
mod scan;
mod types;

use crate::error::MirrorError;
use crate::types::config::Settings;
use crate::types::report::{AnalysisResult, FinalOutput};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>, MirrorError> {
    match as_of {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|e| MirrorError::InvalidTimestamp(format!("{raw}: {e}"))),
        None => Ok(Utc::now()),
    }
}

fn ensure_repository(path: &Path) -> Result<(), MirrorError> {
    if !path.exists() {
        return Err(MirrorError::PathNotFound(path.display().to_string()));
    }
    if !path.join(".git").exists() {
        return Err(MirrorError::NotGitRepo(path.display().to_string()));
    }
    Ok(())
}

fn evaluate(
    path: &Path,
    language: Option<&str>,
    as_of: Option<&str>,
) -> Result<AnalysisResult, MirrorError> {
    ensure_repository(path)?;
    let evaluated_at = parse_as_of(as_of)?;

    let loaded = config::load_config(path)?;
    if loaded.is_none() {
        tracing::debug!(path = %path.display(), "no mirror.toml found, using defaults");
    }
    let settings = Settings::resolve(loaded.as_ref(), language);

    let model = scan::discover(path, &settings, evaluated_at)?;
    Ok(analyze::analyze(&model, &settings, evaluated_at))
}

fn run() -> Result<i32, MirrorError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let analysis = evaluate(&cmd.path, cmd.language.as_deref(), cmd.as_of.as_deref())?;
            let output = FinalOutput::new(
                &analysis,
                analyze::insights::summary(&analysis),
                analyze::insights::roadmap(&analysis),
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&output, output_format)?;
            println!("{rendered}");

            if let Some(out_path) = &cmd.output {
                let json = report::render(&output, report::OutputFormat::Json)?;
                std::fs::write(out_path, json)?;
                tracing::info!(path = %out_path.display(), "wrote json report");
            }

            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Roadmap(cmd) => {
            let analysis = evaluate(&cmd.path, cmd.language.as_deref(), cmd.as_of.as_deref())?;
            let items = analyze::insights::roadmap(&analysis);

            println!(
                "roadmap for {} ({:.2}/100, {}):",
                analysis.repository.name, analysis.overall_score, analysis.tier
            );
            if items.is_empty() {
                println!("- none");
            }
            for item in &items {
                println!(
                    "{}. {} [{:?} effort/{:?} impact]",
                    item.priority, item.action, item.effort, item.impact
                );
                println!("   {}", item.rationale);
            }

            if cmd.export {
                let export = generator::manifest::RoadmapExport::new(&analysis, items);
                let path = generator::manifest::write_roadmap(&cmd.path, &export)?;
                println!("roadmap file: {}", path.display());
            }

            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::FAILURE);
        }
    }
}
