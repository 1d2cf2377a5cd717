//! Error types shared by the scanner, the size accumulator and the terminal layer.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors produced by npkl operations.
///
/// `Display` renders a single line without the underlying cause; the cause is
/// available through [`std::error::Error::source`].
#[derive(Debug)]
pub enum NpklError {
    /// stat, read_dir or remove failed
    Filesystem {
        path: Option<PathBuf>,
        operation: &'static str,
        source: io::Error,
    },
    /// Raw mode could not be entered or left
    TerminalConfig { source: io::Error },
    /// Reading the next key or the confirmation line failed
    Input { source: io::Error },
    /// Writing to the terminal failed
    Output { source: io::Error },
}

impl NpklError {
    pub fn filesystem(path: &Path, operation: &'static str, source: io::Error) -> Self {
        NpklError::Filesystem {
            path: Some(path.to_path_buf()),
            operation,
            source,
        }
    }

    /// Convert a walker error, keeping the path it failed on when known.
    pub fn from_walk(err: jwalk::Error) -> Self {
        let path = err.path().map(Path::to_path_buf);
        NpklError::Filesystem {
            path,
            operation: "read directory",
            source: io::Error::from(err),
        }
    }
}

impl fmt::Display for NpklError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpklError::Filesystem {
                path: Some(path),
                operation,
                ..
            } => write!(f, "failed to {} '{}'", operation, path.display()),
            NpklError::Filesystem {
                path: None,
                operation,
                ..
            } => write!(f, "failed to {}", operation),
            NpklError::TerminalConfig { .. } => write!(f, "failed to configure terminal"),
            NpklError::Input { .. } => write!(f, "failed to read input"),
            NpklError::Output { .. } => write!(f, "failed to write to terminal"),
        }
    }
}

impl std::error::Error for NpklError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NpklError::Filesystem { source, .. }
            | NpklError::TerminalConfig { source }
            | NpklError::Input { source }
            | NpklError::Output { source } => Some(source),
        }
    }
}
