// src/snapshot.rs

use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

#[derive(Debug)]
pub enum SnapshotError {
    NotFound,
    Format(String),
    Io(String),
}

impl SnapshotError {
    /// Message body handed back to `/data` callers when the snapshot cannot be
    /// served. The wording is part of the query contract.
    pub fn user_message(&self) -> String {
        match self {
            SnapshotError::NotFound => "Output file not found".to_string(),
            SnapshotError::Format(_) => "Error decoding JSON file".to_string(),
            SnapshotError::Io(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NotFound => write!(f, "Snapshot file not found"),
            SnapshotError::Format(msg) => write!(f, "Snapshot is not valid JSON: {msg}"),
            SnapshotError::Io(msg) => write!(f, "Snapshot I/O error: {msg}"),
        }
    }
}

impl Error for SnapshotError {}

/// Overwrites `path` wholesale with the pretty-printed listing array. There is
/// no incremental merge; the file is the last completed ingestion run.
pub fn save_snapshot(listings: &[Value], path: &Path) -> Result<(), SnapshotError> {
    let file = File::create(path).map_err(|e| SnapshotError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, listings)
        .map_err(|e| SnapshotError::Io(e.to_string()))?;
    writer.flush().map_err(|e| SnapshotError::Io(e.to_string()))?;

    Ok(())
}

/// Reads the whole snapshot back. A missing file and a file that is not a
/// JSON array are distinct, typed failures for the caller to report.
pub fn load_snapshot(path: &Path) -> Result<Vec<Value>, SnapshotError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(SnapshotError::NotFound),
        Err(e) => return Err(SnapshotError::Io(e.to_string())),
    };

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| SnapshotError::Format(e.to_string()))
}
