//! The shared pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch archives -> resolve record files -> load corpus -> filter market
//! -> resolve dates -> rolling z-scores -> recency clip
//!
//! The front-end then focuses on presentation (printing and exports).

use crate::data::fetch::{ArchiveClient, FetchReport, fetch_years};
use crate::data::store::DataStore;
use crate::domain::{RunConfig, ScoredPoint, ScoredSeries};
use crate::error::AppError;
use crate::io::load::{CorpusReport, load_corpus};
use crate::series::{SeriesReport, build_series};
use crate::stats::rolling::rolling_zscores;
use crate::stats::window::clip_recent;

/// All computed outputs of a single `cotz run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Retrieval/resolution tallies; `None` when the run was offline.
    pub fetch: Option<FetchReport>,
    pub corpus: CorpusReport,
    pub series_report: SeriesReport,
    /// Rows in the full scored series before the recency clip.
    pub rows_scored: usize,
    /// The final clipped series handed to renderers/exporters.
    pub series: ScoredSeries,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run(config: &RunConfig) -> Result<RunOutput, AppError> {
    if config.window == 0 {
        return Err(AppError::config("Rolling window must be at least 1 observation."));
    }
    if config.start_year > config.end_year {
        return Err(AppError::config(format!(
            "Start year {} is after end year {}.",
            config.start_year, config.end_year
        )));
    }

    // 1) Open the working directory.
    let store = DataStore::open(&config.data_dir)?;

    // 2) Fetch and resolve each year, oldest first. Skipped entirely when
    //    offline; the corpus loader below reads whatever is cached either way.
    let fetch = if config.offline {
        None
    } else {
        let client = ArchiveClient::new()?;
        Some(fetch_years(
            &client,
            config.start_year..=config.end_year,
            &store,
        ))
    };

    // 3) Load every cached record file, not just this run's.
    let (data, corpus) = load_corpus(&store)?;

    // 4) Filter to the target market and resolve dates.
    let (rows, series_report) = build_series(&data, &config.market)?;

    // 5) Rolling z-scores, long and short columns independently.
    let longs: Vec<f64> = rows.iter().map(|r| r.long).collect();
    let shorts: Vec<f64> = rows.iter().map(|r| r.short).collect();
    let z_long = rolling_zscores(&longs, config.window);
    let z_short = rolling_zscores(&shorts, config.window);

    let scored: Vec<ScoredPoint> = rows
        .iter()
        .zip(z_long)
        .zip(z_short)
        .map(|((row, z_long), z_short)| ScoredPoint {
            date: row.date,
            z_long,
            z_short,
        })
        .collect();
    let rows_scored = scored.len();

    // 6) Clip to the trailing recency window.
    let points = clip_recent(scored, config.months)?;

    Ok(RunOutput {
        fetch,
        corpus,
        series_report,
        rows_scored,
        series: ScoredSeries {
            market: config.market.clone(),
            window: config.window,
            months: config.months,
            points,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const HEADER: &str = "Market_and_Exchange_Names,As_of_Date_In_Form_YYMMDD,M_Money_Positions_Long_All,M_Money_Positions_Short_All";
    const CATTLE: &str = "LIVE CATTLE - CHICAGO MERCANTILE EXCHANGE";

    fn offline_config(data_dir: &Path) -> RunConfig {
        RunConfig {
            start_year: 2024,
            end_year: 2024,
            market: "LIVE CATTLE".to_string(),
            window: 4,
            months: 14,
            data_dir: data_dir.to_path_buf(),
            offline: true,
            export_csv: None,
            export_json: None,
            quiet: true,
        }
    }

    fn write_cattle_file(dir: &Path) {
        // Ten weekly reporting periods, deliberately out of date order, plus
        // one other market that must be filtered away.
        let mut body = String::from(HEADER);
        let weeks = [
            "240305", "240102", "240109", "240116", "240123", "240130", "240206", "240213",
            "240220", "240227",
        ];
        for (i, week) in weeks.iter().enumerate() {
            body.push_str(&format!("\n{CATTLE},{week},{},{}", 100 + i * 10, 50 + i * 5));
        }
        body.push_str("\nWHEAT-SRW - CHICAGO BOARD OF TRADE,240102,1,2");
        fs::write(dir.join("cot_2024.txt"), body).unwrap();
    }

    #[test]
    fn offline_run_scores_and_sorts_the_cached_corpus() {
        let dir = tempfile::tempdir().unwrap();
        write_cattle_file(dir.path());

        let out = run(&offline_config(dir.path())).unwrap();

        assert!(out.fetch.is_none());
        assert_eq!(out.corpus.files_read, 1);
        assert_eq!(out.series_report.rows_matched, 10);
        assert_eq!(out.rows_scored, 10);

        let points = &out.series.points;
        assert_eq!(points.len(), 10);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));

        // First observation has no trailing history; later ones do.
        assert_eq!(points[0].z_long, None);
        assert!(points[9].z_long.is_some());
        assert!(points[9].z_short.is_some());
    }

    #[test]
    fn recency_clip_restricts_to_the_trailing_months() {
        let dir = tempfile::tempdir().unwrap();
        write_cattle_file(dir.path());

        let mut config = offline_config(dir.path());
        // Max date is 2024-03-05; a 1-month clip keeps rows from 2024-02-05 on.
        config.months = 1;
        let out = run(&config).unwrap();

        assert_eq!(out.rows_scored, 10);
        let points = &out.series.points;
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.date
            >= chrono::NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()));
    }

    #[test]
    fn empty_store_terminates_with_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&offline_config(dir.path())).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unknown_market_terminates_without_scoring() {
        let dir = tempfile::tempdir().unwrap();
        write_cattle_file(dir.path());

        let mut config = offline_config(dir.path());
        config.market = "PORK BELLIES".to_string();
        let err = run(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn zero_window_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = offline_config(dir.path());
        config.window = 0;
        let err = run(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn inverted_year_range_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = offline_config(dir.path());
        config.start_year = 2025;
        config.end_year = 2024;
        let err = run(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
