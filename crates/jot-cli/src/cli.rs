use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jot_diff::DiffStrategy;

#[derive(Parser)]
#[command(
    name = "jot",
    about = "Jotter: note diffs, version history and inline annotations",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    Greedy,
    Myers,
}

impl From<StrategyArg> for DiffStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => DiffStrategy::Greedy,
            StrategyArg::Myers => DiffStrategy::Myers,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show line changes between two files
    Diff(DiffArgs),
    /// Rewrite inline annotations in a JSON document tree (a bare text root
    /// with annotations is returned wrapped in a `span` element)
    Annotate(AnnotateArgs),
    /// Replay files as successive revisions of one note
    History(HistoryArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long)]
    pub strategy: Option<StrategyArg>,
    /// Also print unchanged lines
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct AnnotateArgs {
    pub tree: PathBuf,
}

#[derive(Args)]
pub struct HistoryArgs {
    #[arg(required = true)]
    pub revisions: Vec<PathBuf>,
    /// Note name the revisions are recorded under
    #[arg(short, long, default_value = "Untitled.md")]
    pub name: String,
    #[arg(long)]
    pub strategy: Option<StrategyArg>,
}
