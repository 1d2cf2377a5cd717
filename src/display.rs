//! Output formatting and display logic.

use crate::cleaner::Deletion;
use crate::entry::DirectoryEntry;
use humansize::{FixedAt, FormatSizeOptions, WINDOWS, format_size as humansize_format};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Clear the screen and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

const TB: u64 = 1 << 40;

/// Format a byte count with 1024-based units.
///
/// Below 1 KB the exact count is shown as `"<n> bytes"`, otherwise the value
/// is shown with two decimals and a `KB`/`MB`/`GB`/`TB` suffix. TB is the
/// largest unit used.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }
    let mut options = FormatSizeOptions::from(WINDOWS)
        .decimal_places(2)
        .decimal_zeroes(2);
    if bytes >= TB * 1024 {
        options = options.fixed_at(Some(FixedAt::Tera));
    }
    // humansize labels kilo as "kB"
    humansize_format(bytes, options).replacen("kB", "KB", 1)
}

/// Print the entries about to be deleted and their grand total
pub fn print_deletion_plan<W: Write>(out: &mut W, selected: &[DirectoryEntry]) -> io::Result<()> {
    writeln!(out, "{}", "The following directories will be deleted:".bold())?;
    for entry in selected {
        writeln!(
            out,
            "- {} ({})",
            entry.path.display(),
            format_size(entry.size).green()
        )?;
    }
    let total: u64 = selected.iter().map(|e| e.size).sum();
    writeln!(out)?;
    writeln!(out, "Total size: {}", format_size(total).green().bold())?;
    Ok(())
}

/// Print one line per deletion attempt, then how much space was reclaimed
pub fn print_deletion_report<W: Write>(out: &mut W, deletions: &[Deletion]) -> io::Result<()> {
    let mut freed = 0u64;
    let mut attempted = 0u64;

    for deletion in deletions {
        attempted += deletion.size;
        match &deletion.outcome {
            Ok(()) => {
                freed += deletion.size;
                writeln!(
                    out,
                    "{} {}",
                    "Successfully deleted:".green(),
                    deletion.path.display()
                )?;
            }
            Err(err) => {
                let cause = std::error::Error::source(err)
                    .map(|source| format!(": {}", source))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{} {}{}",
                    "Error deleting".red(),
                    deletion.path.display(),
                    cause
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Freed {} of {} selected",
        format_size(freed).green().bold(),
        format_size(attempted)
    )?;
    Ok(())
}
