use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "funalytics",
    version,
    about = "Funalytics event scoring and audience recommendation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding funalytics.toml and .funalytics/local.toml
    #[arg(long, global = true, default_value = ".")]
    pub policy_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recompute scores for every event
    Score(ScoreCommand),
    /// Order events for one audience
    Rank(RankCommand),
    /// List the audiences each event is suitable for
    Audiences(AudiencesCommand),
    /// Print the effective scoring policy
    Policy(PolicyCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Event JSON file or directory of JSON files
    pub path: PathBuf,
    /// Only score this audience
    #[arg(long)]
    pub audience: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub audience: String,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct AudiencesCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct PolicyCommand {
    /// Validate and report the fingerprint without printing the table
    #[arg(long)]
    pub validate_only: bool,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
