//! Append-only dispatch journal.
//!
//! One serialized [`LogEntry`] per line. The dispatcher only ever appends;
//! nothing in this crate rewrites or truncates the file.

use crate::core::types::LogEntry;
use crate::error::{Result, WareError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub fn append(path: &Path, entry: &LogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| WareError::IoError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| WareError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

    let line = serde_json::to_string(entry)?;
    writeln!(file, "{}", line).map_err(|source| WareError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Read the journal back, skipping blank lines. Lines that fail to parse are
/// skipped rather than fatal so a partially written tail never bricks the
/// tool.
pub fn read_entries(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|source| WareError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
