//! Run summary and series formatting.

use crate::app::pipeline::RunOutput;
use crate::domain::{RunConfig, ScoredSeries};

/// Format the full run summary: retrieval tallies, corpus accounting, and
/// the shape of the final series.
pub fn format_run_summary(out: &RunOutput, config: &RunConfig) -> String {
    let mut s = String::new();

    s.push_str("=== cotz - managed-money positioning z-scores ===\n");
    s.push_str(&format!("Market filter: {}\n", config.market));
    s.push_str(&format!(
        "Years: {}-{}{}\n",
        config.start_year,
        config.end_year,
        if config.offline { " (offline, cache only)" } else { "" },
    ));

    if let Some(fetch) = &out.fetch {
        s.push_str(&format!(
            "Fetch: {} attempted | {} retrieved | {} unavailable | {} transport failures\n",
            fetch.years_attempted, fetch.retrieved, fetch.unavailable, fetch.transport_failures,
        ));
        s.push_str(&format!(
            "Resolve: {} extracted | {} without usable file | {} failed\n",
            fetch.resolved, fetch.without_usable_file, fetch.resolution_failures,
        ));
    }

    s.push_str(&format!(
        "Corpus: {} files read | {} files skipped | {} lines skipped\n",
        out.corpus.files_read,
        out.corpus.files_skipped.len(),
        out.corpus.lines_skipped,
    ));
    for (file, cause) in &out.corpus.files_skipped {
        s.push_str(&format!("  (skipped {file}) {cause}\n"));
    }

    let sr = &out.series_report;
    s.push_str(&format!(
        "Series: {} rows matched | {} bad dates dropped | {} bad values dropped | date column {}\n",
        sr.rows_matched, sr.dates_dropped, sr.values_dropped, sr.date_column,
    ));

    let points = &out.series.points;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        s.push_str(&format!(
            "Output: {} of {} rows within the last {} months ({} to {}) | window {} obs\n",
            points.len(),
            out.rows_scored,
            config.months,
            first.date,
            last.date,
            config.window,
        ));
    }

    s
}

/// Format the scored series as a date-indexed table.
///
/// Undefined scores print as `-` so they read as a gap, not a zero.
pub fn format_series_table(series: &ScoredSeries) -> String {
    let mut s = String::new();
    s.push_str(&format!("{:<12} {:>10} {:>10}\n", "date", "z_long", "z_short"));
    for p in &series.points {
        s.push_str(&format!(
            "{:<12} {:>10} {:>10}\n",
            p.date.to_string(),
            fmt_score(p.z_long),
            fmt_score(p.z_short),
        ));
    }
    s
}

/// Format the distinct market names found in the cached corpus.
pub fn format_markets(names: &[String]) -> String {
    let mut s = String::new();
    s.push_str(&format!("{} distinct markets in cached corpus:\n", names.len()));
    for name in names {
        s.push_str(&format!("  {name}\n"));
    }
    s
}

/// Format the per-year record files currently cached on disk.
pub fn format_status(root: &str, files: &[(String, u64)]) -> String {
    let mut s = String::new();
    s.push_str(&format!("{} record files cached in '{root}':\n", files.len()));
    for (name, size) in files {
        s.push_str(&format!("  {name:<28} {size:>12} bytes\n"));
    }
    s
}

fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoredPoint;
    use chrono::NaiveDate;

    #[test]
    fn undefined_scores_render_as_gaps() {
        let series = ScoredSeries {
            market: "LIVE CATTLE".into(),
            window: 26,
            months: 14,
            points: vec![ScoredPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                z_long: None,
                z_short: Some(1.25),
            }],
        };

        let table = format_series_table(&series);
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains("2024-01-02"));
        assert!(row.contains('-'));
        assert!(row.contains("1.250"));
    }
}
