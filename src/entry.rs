//! Discovered node_modules directories and the ordered scan result.

use std::path::PathBuf;

/// One discovered `node_modules` directory with its size snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Path as found under the scan root
    pub path: PathBuf,
    /// Sum of all regular files beneath `path`, measured once at discovery
    pub size: u64,
    /// Marked for deletion
    pub selected: bool,
}

impl DirectoryEntry {
    /// Create a new, unselected entry
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            selected: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}

/// Entries in discovery (pre-order) order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub entries: Vec<DirectoryEntry>,
}

impl ScanResult {
    /// Create a new empty ScanResult
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DirectoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry's size
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Selected entries, in discovery order
    pub fn selected(&self) -> Vec<DirectoryEntry> {
        self.entries.iter().filter(|e| e.selected).cloned().collect()
    }
}

/// Sum of sizes over the selected entries of `entries`.
pub fn selected_size(entries: &[DirectoryEntry]) -> u64 {
    entries.iter().filter(|e| e.selected).map(|e| e.size).sum()
}
