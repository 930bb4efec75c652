//! Corpus loading: union of all cached per-year record files.
//!
//! Column sets drift across years, so rows are sparse column→value mappings
//! rather than a fixed-width struct, and the combined dataset carries the
//! union of every column seen. Parsing is partial-success at both levels:
//! a malformed line is skipped with the rest of its file still processed,
//! and a file that cannot be parsed at all is skipped with the rest of the
//! corpus still loaded.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::data::store::DataStore;
use crate::error::AppError;

/// One parsed row: a sparse column → raw value mapping.
///
/// Empty fields are not stored, so "missing column in this year's file" and
/// "empty value" both read back as absent.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    fn from_csv(headers: &[String], record: &StringRecord) -> Self {
        let mut row = Self::default();
        for (column, value) in headers.iter().zip(record.iter()) {
            let value = value.trim();
            if !value.is_empty() {
                row.insert(column, value);
            }
        }
        row
    }
}

/// Union-concatenation of every successfully parsed record file.
#[derive(Debug, Clone, Default)]
pub struct CombinedData {
    pub records: Vec<RawRecord>,
    /// Union of all column names seen across files.
    pub columns: BTreeSet<String>,
}

/// Per-file and per-line accounting for the load step.
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    pub files_read: usize,
    /// (file name, cause) for files skipped entirely.
    pub files_skipped: Vec<(String, String)>,
    pub lines_skipped: usize,
}

/// Read every cached record file and union the results.
///
/// Terminal when nothing loads at all (exit code 3); anything short of that
/// is reported and tolerated.
pub fn load_corpus(store: &DataStore) -> Result<(CombinedData, CorpusReport), AppError> {
    let mut data = CombinedData::default();
    let mut report = CorpusReport::default();

    for path in store.record_files()? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_record_file(&path) {
            Ok(parsed) => {
                report.files_read += 1;
                report.lines_skipped += parsed.lines_skipped;
                data.columns.extend(parsed.columns);
                data.records.extend(parsed.records);
            }
            Err(cause) => report.files_skipped.push((name, cause)),
        }
    }

    if data.records.is_empty() {
        return Err(AppError::empty(format!(
            "No data could be loaded from '{}'; nothing to do.",
            store.root().display()
        )));
    }

    Ok((data, report))
}

struct ParsedFile {
    records: Vec<RawRecord>,
    columns: Vec<String>,
    lines_skipped: usize,
}

fn load_record_file(path: &Path) -> Result<ParsedFile, String> {
    let file = File::open(path).map_err(|e| format!("failed to open: {e}"))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| format!("failed to read header row: {e}"))?
        .iter()
        .map(clean_header)
        .collect();

    let mut records = Vec::new();
    let mut lines_skipped = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) => records.push(RawRecord::from_csv(&columns, &record)),
            Err(_) => lines_skipped += 1,
        }
    }

    Ok(ParsedFile {
        records,
        columns,
        lines_skipped,
    })
}

fn clean_header(name: &str) -> String {
    // Some exports prefix the first header with a UTF-8 BOM; left in place it
    // would make the column invisible to every downstream lookup.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
