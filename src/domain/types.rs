//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the run
//! - exported to JSON/CSV for external charting tools

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

/// Market filtered for when none is given on the command line.
pub const DEFAULT_MARKET: &str = "LIVE CATTLE - CHICAGO MERCANTILE EXCHANGE";

/// Fully resolved configuration for one pipeline run.
///
/// Kept separate from the clap arg structs so the pipeline can be driven
/// from tests (or other front-ends) without a command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First calendar year to fetch.
    pub start_year: i32,
    /// Last calendar year to fetch (inclusive).
    pub end_year: i32,
    /// Substring matched against market names (case-sensitive).
    pub market: String,
    /// Rolling window length in observations (reporting periods, not days).
    pub window: usize,
    /// Trailing display window in calendar months.
    pub months: u32,
    /// Working directory holding downloaded archives and extracted files.
    pub data_dir: PathBuf,
    /// Skip all network access; use only files already on disk.
    pub offline: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub quiet: bool,
}

/// Outcome of one year's archive fetch.
///
/// Non-success statuses and transport failures are data, not faults: the
/// year is skipped and the run continues with whatever else is available.
#[derive(Debug)]
pub enum ArchiveOutcome {
    /// 200-equivalent response; the raw zip body.
    Retrieved(Vec<u8>),
    /// Non-success HTTP status (e.g. 404 for years with no published archive).
    Unavailable(u16),
    /// Connection or transport failure before a status was obtained.
    Transport(String),
}

/// One filtered market row with its parsed date and position counts.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub date: NaiveDate,
    /// Managed-money long position count.
    pub long: f64,
    /// Managed-money short position count.
    pub short: f64,
}

/// One output point: date plus the two rolling z-scores.
///
/// `None` marks an undefined score: zero trailing variance, or a window
/// holding a single observation. Undefined is distinct from `0.0` (which
/// means "exactly at the trailing mean") and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPoint {
    pub date: NaiveDate,
    pub z_long: Option<f64>,
    pub z_short: Option<f64>,
}

/// The final windowed series handed to renderers/exporters.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSeries {
    /// The market substring the series was filtered on.
    pub market: String,
    /// Rolling window length the scores were computed with.
    pub window: usize,
    /// Trailing calendar-month span the series was clipped to.
    pub months: u32,
    pub points: Vec<ScoredPoint>,
}
