use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "list-filter",
    about = "Load every entry of a saved list snapshot and filter it with include/exclude terms."
)]
pub struct Cli {
    /// Saved HTML page holding the list.
    pub snapshot: PathBuf,
    /// Search terms; prefix a term with '-' to exclude entries containing it.
    #[arg(long, short, default_value = "", allow_hyphen_values = true)]
    pub query: String,
    /// RON file overriding session timings, container selector and paging.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Entries materialized per scroll of a `data-virtual-list` element.
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Location reported for the page, used to classify overview vs. list views.
    #[arg(long)]
    pub location: Option<String>,
    /// Charset label used when the snapshot carries no BOM.
    #[arg(long)]
    pub charset: Option<String>,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
    /// Drive timers on the wall clock instead of virtual time.
    #[arg(long)]
    pub realtime: bool,
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,
    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}
