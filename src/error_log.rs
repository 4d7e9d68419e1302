/*!
 * Append-only error log.
 *
 * One line per record, `timestamp | subject | reason`, timestamp in a fixed
 * sortable format. The log is a process-wide resource; appends are mutually
 * exclusive but carry no ordering guarantee across documents. Append
 * failures are swallowed so that logging never becomes a new failure source.
 */

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::warn;
use parking_lot::Mutex;

/// Timestamp format for log records, sortable lexicographically
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Process-wide append-only error log
#[derive(Debug)]
pub struct ErrorLog {
    /// Path of the log file
    path: PathBuf,
    /// Serializes appends; held only for the duration of one write
    lock: Mutex<()>,
}

impl ErrorLog {
    /// Create a handle for the log at `path`.
    ///
    /// The file is created lazily on first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Failures are reported to the console and
    /// otherwise ignored.
    pub fn append(&self, subject: &str, reason: &str) {
        if let Err(e) = self.try_append(subject, reason) {
            warn!("Failed to append to error log {:?}: {}", self.path, e);
        }
    }

    fn try_append(&self, subject: &str, reason: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let _guard = self.lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open error log: {:?}", self.path))?;
        writeln!(file, "{} | {} | {}", timestamp, subject, reason)
            .with_context(|| format!("Failed to write to error log: {:?}", self.path))?;
        Ok(())
    }
}
