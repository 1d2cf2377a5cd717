//! Concurrent directory size accumulation.
//!
//! The directory tree is walked on the calling thread. Every regular file found
//! is handed to the worker pool as its own unit, which reads the file's metadata
//! and adds its size to a shared [`SizeTally`]. The walk never waits on a unit;
//! the end of the rayon scope is the join-all point.
//!
//! Outstanding units are never cancelled: after a walk error or a unit error the
//! accumulator still waits for every dispatched unit before it returns the error.

use crate::error::NpklError;
use filesize::PathExt;
use jwalk::{Parallelism, WalkDir};
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// How a file's size is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeMode {
    /// File length as reported by metadata
    #[default]
    Apparent,
    /// Space actually allocated on disk
    OnDisk,
}

/// Shared state of one accumulation: a running total and a single error slot.
///
/// Only the first recorded error is kept, later ones are dropped. If any error
/// was recorded the total is discarded.
#[derive(Debug, Default)]
pub struct SizeTally {
    total: AtomicU64,
    first_error: OnceLock<NpklError>,
}

impl SizeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, bytes: u64) {
        self.total.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Keep `err` unless an earlier error is already held
    pub fn record_error(&self, err: NpklError) {
        let _ = self.first_error.set(err);
    }

    pub fn into_result(self) -> Result<u64, NpklError> {
        match self.first_error.into_inner() {
            Some(err) => Err(err),
            None => Ok(self.total.into_inner()),
        }
    }
}

/// Sums regular file sizes below a directory using a worker pool
#[derive(Default)]
pub struct SizeAccumulator {
    /// Dedicated pool (None = rayon's global pool)
    pool: Option<ThreadPool>,
    mode: SizeMode,
}

impl SizeAccumulator {
    /// Create an accumulator on the global pool measuring apparent size
    pub fn new() -> Self {
        Self::default()
    }

    /// Run units on a dedicated pool of `threads` workers
    pub fn with_threads(mut self, threads: Option<usize>) -> anyhow::Result<Self> {
        self.pool = match threads {
            Some(n) => Some(ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };
        Ok(self)
    }

    pub fn with_mode(mut self, mode: SizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Total size in bytes of every regular file transitively under `dir`.
    ///
    /// Fails if the walk cannot read a directory or if any file's metadata
    /// cannot be read; no partial total is ever returned.
    pub fn size_of(&self, dir: &Path) -> Result<u64, NpklError> {
        fs::symlink_metadata(dir).map_err(|e| NpklError::filesystem(dir, "read metadata of", e))?;

        let tally = SizeTally::new();
        let walked = match &self.pool {
            Some(pool) => pool.in_place_scope(|scope| self.dispatch(dir, scope, &tally)),
            None => rayon::in_place_scope(|scope| self.dispatch(dir, scope, &tally)),
        };
        walked?;
        tally.into_result()
    }

    /// Walk `dir` and spawn one unit per regular file
    fn dispatch<'scope>(
        &self,
        dir: &Path,
        scope: &Scope<'scope>,
        tally: &'scope SizeTally,
    ) -> Result<(), NpklError> {
        let walker = WalkDir::new(dir)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(NpklError::from_walk)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let mode = self.mode;
            scope.spawn(move |_| match measure(&path, mode) {
                Ok(bytes) => tally.add(bytes),
                Err(e) => tally.record_error(NpklError::filesystem(&path, "read metadata of", e)),
            });
        }
        Ok(())
    }
}

/// Size of a single file
fn measure(path: &Path, mode: SizeMode) -> io::Result<u64> {
    let metadata = fs::symlink_metadata(path)?;
    match mode {
        SizeMode::Apparent => Ok(metadata.len()),
        SizeMode::OnDisk => path.size_on_disk_fast(&metadata),
    }
}
