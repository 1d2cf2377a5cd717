//! Removal of the selected directories.

use crate::entry::DirectoryEntry;
use crate::error::NpklError;
use std::fs;
use std::path::PathBuf;

/// Result of removing one directory
#[derive(Debug)]
pub struct Deletion {
    pub path: PathBuf,
    pub size: u64,
    pub outcome: Result<(), NpklError>,
}

/// Remove every entry in order, continuing past failures.
pub fn delete_all(entries: &[DirectoryEntry]) -> Vec<Deletion> {
    entries
        .iter()
        .map(|entry| Deletion {
            path: entry.path.clone(),
            size: entry.size,
            outcome: fs::remove_dir_all(&entry.path)
                .map_err(|e| NpklError::filesystem(&entry.path, "remove", e)),
        })
        .collect()
}
