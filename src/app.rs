//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fetch/load/score pipeline
//! - prints reports
//! - writes optional exports

use std::collections::BTreeSet;

use chrono::Datelike;
use clap::Parser;

use crate::cli::{Command, MarketsArgs, RunArgs, StatusArgs};
use crate::data::store::DataStore;
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `cotz` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `cotz` (and `cotz -m WHEAT`) to behave like `cotz run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Markets(args) => handle_markets(args),
        Command::Status(args) => handle_status(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let out = pipeline::run(&config)?;

    println!("{}", crate::report::format_run_summary(&out, &config));
    if !config.quiet {
        println!("{}", crate::report::format_series_table(&out.series));
    }

    // Optional exports for external charting tools.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_series_csv(path, &out.series)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_series_json(path, &out.series)?;
    }

    Ok(())
}

fn handle_markets(args: MarketsArgs) -> Result<(), AppError> {
    let store = DataStore::open(&args.data_dir)?;
    let (data, _report) = crate::io::load::load_corpus(&store)?;

    let mut names: BTreeSet<String> = data
        .records
        .iter()
        .filter_map(|r| r.get(crate::series::MARKET_COLUMN))
        .map(str::to_string)
        .collect();
    if let Some(filter) = &args.filter {
        names.retain(|n| n.contains(filter.as_str()));
    }

    if names.is_empty() {
        return Err(AppError::empty("No markets match."));
    }

    let names: Vec<String> = names.into_iter().collect();
    println!("{}", crate::report::format_markets(&names));
    Ok(())
}

fn handle_status(args: StatusArgs) -> Result<(), AppError> {
    let store = DataStore::open(&args.data_dir)?;

    let mut files = Vec::new();
    for path in store.record_files()? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        files.push((name, size));
    }

    println!(
        "{}",
        crate::report::format_status(&store.root().display().to_string(), &files)
    );
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        start_year: args.start_year,
        end_year: args.end_year.unwrap_or_else(current_year),
        market: args.market.clone(),
        window: args.window,
        months: args.months,
        data_dir: args.data_dir.clone(),
        offline: args.offline,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
        quiet: args.quiet,
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Rewrite argv so `cotz` defaults to `cotz run`.
///
/// Rules:
/// - `cotz`                     -> `cotz run`
/// - `cotz -m WHEAT ...`        -> `cotz run -m WHEAT ...`
/// - `cotz --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "markets" | "status");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
