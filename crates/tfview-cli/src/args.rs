use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use tfview_views::ViewType;

#[derive(Parser)]
#[command(name = "tfview")]
#[command(
    about = "Refresh recorded infrastructure state and report progress",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $TFVIEW_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Disable ANSI colors in human output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile recorded state with the real remote objects
    Refresh(RefreshArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct RefreshArgs {
    /// Emit one JSON record per line instead of text
    #[arg(long)]
    pub json: bool,

    /// Output view by name (human, json, raw)
    #[arg(long, value_name = "TYPE", conflicts_with = "json")]
    pub view: Option<ViewType>,

    /// State snapshot to refresh
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Number of resources refreshed concurrently
    #[arg(long, value_name = "N")]
    pub parallelism: Option<usize>,

    /// Limit the refresh to the given resource (repeatable)
    #[arg(long = "target", value_name = "ADDR")]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
