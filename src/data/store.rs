//! The working-directory store for extracted record files.
//!
//! The store acts as a year-keyed cache with a documented lifecycle: created
//! once, read by every run, never pruned automatically. The corpus loader
//! reads whatever is present regardless of the current run's retrieval
//! results, so a year that fails to download this time can still contribute
//! rows from an earlier run. A fresh run requires clearing the directory by
//! hand.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Extension of extracted per-year record files.
pub const RECORD_EXT: &str = "txt";

#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Open the store, creating the directory if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            AppError::config(format!(
                "Failed to create data directory '{}': {e}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// On-disk name for a year's downloaded archive.
    pub fn archive_name(year: i32) -> String {
        format!("cot_{year}.zip")
    }

    /// On-disk name for a year extracted under the generic in-archive name.
    ///
    /// The generic name is the same literal every year, so it must be mapped
    /// to a year-qualified name before it touches the shared directory.
    pub fn fallback_record_name(year: i32) -> String {
        format!("cot_{year}.{RECORD_EXT}")
    }

    /// Every record file currently cached, sorted by file name.
    ///
    /// Not limited to files produced by this run; this is what enables
    /// incremental/offline reuse.
    pub fn record_files(&self) -> Result<Vec<PathBuf>, AppError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            AppError::config(format!(
                "Failed to read data directory '{}': {e}",
                self.root.display()
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                AppError::config(format!(
                    "Failed to read data directory '{}': {e}",
                    self.root.display()
                ))
            })?;
            let path = entry.path();
            let is_record = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(RECORD_EXT));
            if is_record {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("cot_data");
        let store = DataStore::open(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn record_files_filters_extension_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();

        fs::write(store.join("cot_2012.txt"), "a").unwrap();
        fs::write(store.join("cot_2010.txt"), "b").unwrap();
        fs::write(store.join("archive_2010.zip"), "c").unwrap();
        fs::write(store.join("notes.md"), "d").unwrap();

        let files: Vec<String> = store
            .record_files()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["cot_2010.txt", "cot_2012.txt"]);
    }

    #[test]
    fn fallback_names_are_unique_per_year() {
        assert_ne!(
            DataStore::fallback_record_name(2010),
            DataStore::fallback_record_name(2011)
        );
    }
}
