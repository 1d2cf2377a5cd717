//! Command-line argument parsing using clap derive macros.

use crate::size::SizeMode;
use clap::Parser;
use std::path::PathBuf;

/// Find node_modules directories and delete the ones you pick.
///
/// Lists every node_modules directory below PATH with its size, lets you
/// select entries with the arrow keys and space, and removes them after a
/// final Y/N confirmation.
#[derive(Parser, Debug)]
#[command(name = "npkl")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory to search (defaults to current directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Number of threads used to measure files (defaults to number of CPU cores)
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Report allocated disk usage instead of apparent file size
    #[arg(short = 'u', long = "disk-usage")]
    pub disk_usage: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn size_mode(&self) -> SizeMode {
        if self.disk_usage {
            SizeMode::OnDisk
        } else {
            SizeMode::Apparent
        }
    }
}
