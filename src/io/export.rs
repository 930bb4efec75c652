//! Export the final scored series for external consumers.
//!
//! The exports are the renderer seam: a charting tool reads the CSV or JSON
//! and draws the two z-score lines. Undefined scores are an empty CSV field
//! / JSON `null`, so consumers can leave a gap rather than plotting a fake
//! zero.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ScoredSeries;
use crate::error::AppError;

/// Write the series as `date,z_long,z_short` rows.
pub fn write_series_csv(path: &Path, series: &ScoredSeries) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "date,z_long,z_short")
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for p in &series.points {
        writeln!(file, "{},{},{}", p.date, fmt_score(p.z_long), fmt_score(p.z_short))
            .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the series (market + window parameters + points) as JSON.
pub fn write_series_json(path: &Path, series: &ScoredSeries) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, series)
        .map_err(|e| AppError::config(format!("Failed to write export JSON: {e}")))
}

fn fmt_score(score: Option<f64>) -> String {
    score.map(|v| format!("{v:.6}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoredPoint;
    use chrono::NaiveDate;

    fn sample_series() -> ScoredSeries {
        ScoredSeries {
            market: "LIVE CATTLE".to_string(),
            window: 26,
            months: 14,
            points: vec![
                ScoredPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    z_long: None,
                    z_short: None,
                },
                ScoredPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                    z_long: Some(0.707107),
                    z_short: Some(-0.707107),
                },
            ],
        }
    }

    #[test]
    fn csv_leaves_undefined_scores_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_series_csv(&path, &sample_series()).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "date,z_long,z_short");
        assert_eq!(lines[1], "2024-01-02,,");
        assert_eq!(lines[2], "2024-01-09,0.707107,-0.707107");
    }

    #[test]
    fn json_represents_undefined_scores_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        write_series_json(&path, &sample_series()).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["market"], "LIVE CATTLE");
        assert_eq!(value["window"], 26);
        assert!(value["points"][0]["z_long"].is_null());
        assert!(value["points"][1]["z_long"].as_f64().is_some());
    }
}
