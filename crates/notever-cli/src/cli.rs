use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "notever",
    about = "notever: inspect and apply note diff payloads",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the diff payload turning OLD into NEW
    Diff(DiffArgs),
    /// Apply a diff payload to a base text
    Apply(ApplyArgs),
    /// List the operations in a diff payload
    Inspect(InspectArgs),
    /// Report whether a text would be stored as a diff
    Check(CheckArgs),
    /// Apply a chain of payloads to a base text, in order
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Write the payload here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub base: PathBuf,
    pub payload: PathBuf,
    /// Print the base text instead of failing on a bad payload
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    pub payload: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ReplayArgs {
    pub base: PathBuf,
    #[arg(required = true)]
    pub payloads: Vec<PathBuf>,
}
