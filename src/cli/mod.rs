//! Command-line parsing for the COT z-score pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data/statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_MARKET;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "cotz",
    version,
    about = "Rolling z-scores of CFTC disaggregated COT managed-money positioning"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch yearly archives, rebuild the series, and print/export z-scores.
    Run(RunArgs),
    /// List the distinct market names present in the cached corpus.
    Markets(MarketsArgs),
    /// Show the per-year record files currently cached on disk.
    Status(StatusArgs),
}

/// Options for a full pipeline run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// First calendar year to fetch.
    #[arg(long, default_value_t = 2010)]
    pub start_year: i32,

    /// Last calendar year to fetch (defaults to the current year).
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Substring matched (case-sensitively) against market names.
    #[arg(short = 'm', long, default_value = DEFAULT_MARKET)]
    pub market: String,

    /// Rolling window length in observations (reporting periods, not days).
    #[arg(short = 'w', long, default_value_t = 26)]
    pub window: usize,

    /// Trailing display window in calendar months.
    #[arg(long, default_value_t = 14)]
    pub months: u32,

    /// Working directory for downloaded archives and extracted record files.
    #[arg(long, default_value = "./cot_data")]
    pub data_dir: PathBuf,

    /// Skip all downloads; use only files already on disk.
    #[arg(long)]
    pub offline: bool,

    /// Export the final series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the final series (with market/window parameters) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Print the run summary only, without the per-row series table.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for listing cached markets.
#[derive(Debug, Parser)]
pub struct MarketsArgs {
    /// Working directory holding extracted record files.
    #[arg(long, default_value = "./cot_data")]
    pub data_dir: PathBuf,

    /// Only list markets containing this substring.
    #[arg(short = 'f', long)]
    pub filter: Option<String>,
}

/// Options for showing the cache contents.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Working directory holding extracted record files.
    #[arg(long, default_value = "./cot_data")]
    pub data_dir: PathBuf,
}
