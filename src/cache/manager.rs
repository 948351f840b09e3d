//! Cache file holding the most recently fetched rates page
//!
//! The page is stored verbatim at a single path. The file's modification time
//! is the only freshness metadata: a cached page is usable for the calendar
//! day it was written on and nothing else.

use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Permission bits for the cache file (owner read/write, others read)
#[cfg(unix)]
const CACHE_FILE_MODE: u32 = 0o644;

/// Reads and writes the cached rates page on disk
#[derive(Debug, Clone)]
pub struct RatesCache {
    /// Location of the cached page
    path: PathBuf,
}

impl RatesCache {
    /// Creates a cache backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the local calendar date the cache file was last modified on
    ///
    /// Returns `None` if the file doesn't exist or its timestamp is unreadable.
    pub fn modified_date(&self) -> Option<NaiveDate> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        let local: DateTime<Local> = modified.into();
        Some(local.date_naive())
    }

    /// Reports whether the cache file was written on `today`
    ///
    /// Only the year, month and day are compared. A missing file is simply
    /// not fresh.
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.modified_date() == Some(today)
    }

    /// Writes the page verbatim, replacing any previous content
    ///
    /// Creates the parent directory if it is missing.
    pub fn write(&self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(CACHE_FILE_MODE);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(document.as_bytes())?;
        file.flush()
    }

    /// Reads the cached page back
    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
