use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vocabrep_core::{parse_date_key, ScopeFilter};

#[derive(Debug, Parser, Clone)]
#[command(name = "vocabrep", version, about = "Spaced-repetition engine driver")]
pub struct Cli {
    /// Engine config file (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log scheduling decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute one SM-2 step and print it
    Schedule(ScheduleCmd),
    /// Replay an answer log and print the user's dashboard
    Replay(ReplayCmd),
    /// Replay an answer log and print the due cards
    Queue(QueueCmd),
}

#[derive(Debug, Args, Clone)]
pub struct ScheduleCmd {
    #[arg(long, allow_negative_numbers = true)]
    pub quality: i32,
    #[arg(long, default_value_t = 2.5)]
    pub ease_factor: f64,
    #[arg(long, default_value_t = 1)]
    pub interval: u32,
    #[arg(long, default_value_t = 0)]
    pub repetitions: u32,
    /// Day the review happens on (YYYY-MM-DD); defaults to the configured clock
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct ReplayCmd {
    /// JSON array of answer events
    #[arg(long)]
    pub events: PathBuf,
    #[arg(long, default_value = "default")]
    pub user: String,
    /// Day to report on (YYYY-MM-DD); defaults to the last event's day
    #[arg(long, value_parser = parse_day)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct QueueCmd {
    #[command(flatten)]
    pub replay: ReplayCmd,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub scope: ScopeArg,
    /// Restrict to one category id (implies --scope category)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    All,
    Custom,
    Category,
}

impl QueueCmd {
    pub fn scope_filter(&self) -> ScopeFilter {
        match (&self.category, self.scope) {
            (Some(id), _) => ScopeFilter::Category(id.clone()),
            (None, ScopeArg::All) => ScopeFilter::All,
            (None, ScopeArg::Custom) => ScopeFilter::Custom,
            (None, ScopeArg::Category) => ScopeFilter::AnyCategory,
        }
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date_key(s).map_err(|e| e.to_string())
}
