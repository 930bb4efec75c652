//! Market filtering, date resolution, and numeric extraction.
//!
//! Turns the combined sparse dataset into a clean date-ascending position
//! series for one market:
//!
//! - substring filter on the market-name column (rows without a name never match)
//! - dual date-convention resolution (compact `YYMMDD` vs. delimited date)
//! - per-row drops are counted and reported, never silent

use chrono::NaiveDate;

use crate::domain::PositionRow;
use crate::error::AppError;
use crate::io::load::{CombinedData, RawRecord};

pub const MARKET_COLUMN: &str = "Market_and_Exchange_Names";

/// Compact numeric year-month-day encoding (`%y%m%d`), used by most years.
pub const DATE_COMPACT_COLUMN: &str = "As_of_Date_In_Form_YYMMDD";
/// Already-delimited date string, the fallback convention.
pub const DATE_PLAIN_COLUMN: &str = "As_of_Date";

pub const LONG_COLUMN: &str = "M_Money_Positions_Long_All";
pub const SHORT_COLUMN: &str = "M_Money_Positions_Short_All";

/// Accounting for the filter/date/numeric steps.
#[derive(Debug, Clone)]
pub struct SeriesReport {
    /// Rows that matched the market substring.
    pub rows_matched: usize,
    /// Which date convention was resolved for this corpus.
    pub date_column: &'static str,
    /// Rows dropped because their date failed to parse.
    pub dates_dropped: usize,
    /// Rows dropped because a position count was missing or non-numeric.
    pub values_dropped: usize,
}

/// Filter to one market and resolve each row's date and position counts.
///
/// The result is strictly sorted ascending by date.
pub fn build_series(
    data: &CombinedData,
    market: &str,
) -> Result<(Vec<PositionRow>, SeriesReport), AppError> {
    // 1) Substring filter on the market name.
    let matched: Vec<&RawRecord> = data
        .records
        .iter()
        .filter(|r| r.get(MARKET_COLUMN).is_some_and(|name| name.contains(market)))
        .collect();

    if matched.is_empty() {
        return Err(AppError::empty(format!(
            "No rows match market '{market}'."
        )));
    }

    // 2) Resolve which date convention this corpus carries.
    let (date_column, compact) = if data.columns.contains(DATE_COMPACT_COLUMN) {
        (DATE_COMPACT_COLUMN, true)
    } else if data.columns.contains(DATE_PLAIN_COLUMN) {
        (DATE_PLAIN_COLUMN, false)
    } else {
        return Err(AppError::config(format!(
            "No recognized date column found (expected `{DATE_COMPACT_COLUMN}` or `{DATE_PLAIN_COLUMN}`)."
        )));
    };

    for column in [LONG_COLUMN, SHORT_COLUMN] {
        if !data.columns.contains(column) {
            return Err(AppError::config(format!(
                "Missing required position column `{column}`."
            )));
        }
    }

    // 3) Parse per row; drops are counted, not silent.
    let mut rows = Vec::with_capacity(matched.len());
    let mut dates_dropped = 0usize;
    let mut values_dropped = 0usize;

    for record in &matched {
        let date = record.get(date_column).and_then(|raw| {
            if compact {
                parse_compact_date(raw)
            } else {
                parse_plain_date(raw)
            }
        });
        let Some(date) = date else {
            dates_dropped += 1;
            continue;
        };

        let long = record.get(LONG_COLUMN).and_then(parse_count);
        let short = record.get(SHORT_COLUMN).and_then(parse_count);
        let (Some(long), Some(short)) = (long, short) else {
            values_dropped += 1;
            continue;
        };

        rows.push(PositionRow { date, long, short });
    }

    if rows.is_empty() {
        return Err(AppError::empty(format!(
            "No rows for '{market}' survived date/value parsing."
        )));
    }

    // 4) Sort ascending by date before any windowed statistics.
    rows.sort_by_key(|r| r.date);

    let report = SeriesReport {
        rows_matched: matched.len(),
        date_column,
        dates_dropped,
        values_dropped,
    };
    Ok((rows, report))
}

fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%y%m%d").ok()
}

fn parse_plain_date(raw: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_count(raw: &str) -> Option<f64> {
    let v = raw.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
