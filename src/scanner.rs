//! Locating node_modules directories.

use crate::display::format_size;
use crate::entry::{DirectoryEntry, ScanResult};
use crate::error::NpklError;
use crate::size::SizeAccumulator;
use indicatif::{ProgressBar, ProgressStyle};
use jwalk::{Parallelism, WalkDir};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Directory name the scanner looks for
pub const NODE_MODULES: &str = "node_modules";

/// Scanner configuration
pub struct Scanner {
    /// Measures each match
    accumulator: SizeAccumulator,
    /// Show a spinner on stderr while scanning
    show_progress: bool,
}

impl Scanner {
    /// Create a new Scanner with default settings
    pub fn new(accumulator: SizeAccumulator) -> Self {
        Self {
            accumulator,
            show_progress: false,
        }
    }

    /// Show a progress spinner while scanning
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Find every `node_modules` directory under `root` in pre-order and size it.
    ///
    /// Matched directories are not descended into, so nested `node_modules`
    /// are counted as part of their outermost match. The first error aborts
    /// the scan and nothing is returned.
    pub fn find(&self, root: &Path) -> Result<ScanResult, NpklError> {
        let pb = self.spinner();
        let start_time = Instant::now();
        let mut result = ScanResult::new();

        fs::metadata(root).map_err(|e| NpklError::filesystem(root, "read metadata of", e))?;
        if root.file_name().is_some_and(is_node_modules) {
            let size = self.accumulator.size_of(root)?;
            result.push(DirectoryEntry::new(root.to_path_buf(), size));
            self.finish(&pb, &result, start_time.elapsed());
            return Ok(result);
        }

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .process_read_dir(|_depth, _path, _state, children| {
                for child in children.iter_mut().flatten() {
                    if child.file_type().is_dir() && is_node_modules(child.file_name()) {
                        child.read_children_path = None;
                    }
                }
            });

        for entry in walker {
            let entry = entry.map_err(NpklError::from_walk)?;
            if entry.depth == 0 {
                continue;
            }

            if !entry.file_type().is_dir() {
                continue;
            }
            if !is_node_modules(entry.file_name()) {
                pb.set_message(format!(
                    "Scanning: {} | {} found | {}",
                    truncate_str(&entry.file_name().to_string_lossy(), 20),
                    format_number(result.len() as u64),
                    format_size(result.total_size())
                ));
                continue;
            }

            let path = entry.path();
            pb.set_message(format!("Measuring: {}", path.display()));
            let size = self.accumulator.size_of(&path)?;
            result.push(DirectoryEntry::new(path, size));
        }

        self.finish(&pb, &result, start_time.elapsed());
        Ok(result)
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting scan...");
        pb
    }

    fn finish(&self, pb: &ProgressBar, result: &ScanResult, elapsed: Duration) {
        pb.finish_with_message(format!(
            "Found {} node_modules directories ({}) in {}",
            format_number(result.len() as u64),
            format_size(result.total_size()),
            format_duration(elapsed)
        ));
    }
}

fn is_node_modules(name: &OsStr) -> bool {
    name.to_str() == Some(NODE_MODULES)
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Truncate a string to max chars with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a duration in human-readable form
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:02}s", secs, millis / 10)
    } else {
        format!("{}ms", millis)
    }
}
