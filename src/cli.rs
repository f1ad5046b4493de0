use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-mirror",
    version,
    about = "Score a git repository across six quality dimensions"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and print the scored report
    Analyze(AnalyzeCommand),
    /// Print the prioritised improvement roadmap
    Roadmap(RoadmapCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Also write the JSON document to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Primary language hint (overrides project.language)
    #[arg(long)]
    pub language: Option<String>,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Args)]
pub struct RoadmapCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub as_of: Option<String>,
    /// Write the roadmap under .mirror/roadmaps/
    #[arg(long)]
    pub export: bool,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
