//! Per-year archive retrieval and inner-file resolution.
//!
//! The CFTC publishes one zip archive per calendar year. Inner-file naming
//! drifted over the years: newer archives carry a year-qualified record file,
//! older ones only a generic name that is the same literal every year. The
//! resolver probes both conventions and always lands the bytes under a
//! year-qualified path in the store, so extractions from different years
//! cannot collide.
//!
//! Every per-year failure (bad status, transport error, corrupt archive,
//! unexpected contents) is recoverable: the year is skipped and the loop
//! continues.

use std::fs;
use std::io::{Cursor, Read};
use std::ops::RangeInclusive;
use std::time::Duration;

use reqwest::blocking::Client;
use zip::ZipArchive;

use crate::data::store::DataStore;
use crate::domain::ArchiveOutcome;
use crate::error::AppError;

const URL_TEMPLATE: &str = "https://www.cftc.gov/files/dea/history/com_disagg_txt_{year}.zip";

/// Generic in-archive name used by older yearly archives.
const FALLBACK_NAME: &str = "c_year.txt";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the yearly archives.
pub struct ArchiveClient {
    client: Client,
}

impl ArchiveClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn archive_url(year: i32) -> String {
        URL_TEMPLATE.replace("{year}", &year.to_string())
    }

    /// Single fetch attempt for one year's archive. No retries.
    ///
    /// Never returns an error: non-success statuses and transport failures
    /// are classified into the outcome so the multi-year loop keeps going.
    pub fn fetch_year(&self, year: i32) -> ArchiveOutcome {
        let url = Self::archive_url(year);
        let resp = match self.client.get(&url).send() {
            Ok(r) => r,
            Err(e) => return ArchiveOutcome::Transport(e.to_string()),
        };
        if !resp.status().is_success() {
            return ArchiveOutcome::Unavailable(resp.status().as_u16());
        }
        match resp.bytes() {
            Ok(body) => ArchiveOutcome::Retrieved(body.to_vec()),
            Err(e) => ArchiveOutcome::Transport(e.to_string()),
        }
    }
}

/// What the resolver did with one year's retrieved archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Record file written into the store under this file name.
    Extracted(String),
    /// Neither expected inner name was present. Not an error, just no file.
    Missing,
    /// The archive was unreadable or extraction failed.
    Failed(String),
}

/// Pick the record file inside a year's archive and write it into the store
/// under a year-qualified name.
///
/// Probing order (first match wins):
/// 1. `com_disagg_txt_{year}.txt` — already unique, stored as-is.
/// 2. `c_year.txt` — stored as `cot_{year}.txt`; the generic name never
///    touches the shared directory, so a prior year's file is never clobbered.
/// 3. neither — no file is produced for the year.
pub fn resolve_archive(bytes: &[u8], year: i32, store: &DataStore) -> Resolution {
    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(a) => a,
        Err(e) => return Resolution::Failed(format!("unreadable archive: {e}")),
    };

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let year_qualified = format!("com_disagg_txt_{year}.txt");

    let (inner, target) = if names.iter().any(|n| n == &year_qualified) {
        (year_qualified.clone(), year_qualified)
    } else if names.iter().any(|n| n == FALLBACK_NAME) {
        (FALLBACK_NAME.to_string(), DataStore::fallback_record_name(year))
    } else {
        return Resolution::Missing;
    };

    let mut contents = Vec::new();
    match archive.by_name(&inner) {
        Ok(mut file) => {
            if let Err(e) = file.read_to_end(&mut contents) {
                return Resolution::Failed(format!("failed to read '{inner}': {e}"));
            }
        }
        Err(e) => return Resolution::Failed(format!("failed to open '{inner}': {e}")),
    }

    let path = store.join(&target);
    if let Err(e) = fs::write(&path, &contents) {
        return Resolution::Failed(format!("failed to write '{}': {e}", path.display()));
    }
    Resolution::Extracted(target)
}

/// Tally of one run's retrieval/resolution loop.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub years_attempted: usize,
    pub retrieved: usize,
    pub unavailable: usize,
    pub transport_failures: usize,
    pub resolved: usize,
    pub without_usable_file: usize,
    pub resolution_failures: usize,
}

/// Fetch and resolve every year in the range, strictly one at a time in
/// increasing year order. Per-year failures are printed and tallied; none
/// of them aborts the loop.
pub fn fetch_years(
    client: &ArchiveClient,
    years: RangeInclusive<i32>,
    store: &DataStore,
) -> FetchReport {
    let mut report = FetchReport::default();

    for year in years {
        report.years_attempted += 1;
        eprintln!("Fetching archive for {year}...");

        let body = match client.fetch_year(year) {
            ArchiveOutcome::Retrieved(body) => {
                report.retrieved += 1;
                // Keep the raw archive alongside the extracted file; only
                // `.txt` files enter the corpus, so it never pollutes loads.
                let archive_path = store.join(&DataStore::archive_name(year));
                if let Err(e) = fs::write(&archive_path, &body) {
                    eprintln!("{year}: failed to keep archive copy: {e}");
                }
                body
            }
            ArchiveOutcome::Unavailable(status) => {
                report.unavailable += 1;
                eprintln!("{year}: no archive available (HTTP {status}).");
                continue;
            }
            ArchiveOutcome::Transport(cause) => {
                report.transport_failures += 1;
                eprintln!("{year}: fetch failed: {cause}");
                continue;
            }
        };

        match resolve_archive(&body, year, store) {
            Resolution::Extracted(name) => {
                report.resolved += 1;
                eprintln!("{year}: extracted {name}");
            }
            Resolution::Missing => {
                report.without_usable_file += 1;
                eprintln!("{year}: no usable record file in archive.");
            }
            Resolution::Failed(cause) => {
                report.resolution_failures += 1;
                eprintln!("{year}: {cause}");
            }
        }
    }

    report
}
