//! npkl: find node_modules directories and delete the ones you pick.
//!
//! Scans a directory tree for node_modules folders, measures them
//! concurrently, lets the user pick entries in an interactive list, and
//! removes the picked ones after confirmation.

mod cleaner;
mod cli;
mod display;
mod entry;
mod error;
mod scanner;
mod selector;
mod size;
mod terminal;

use anyhow::{Context, Result};
use cli::Args;
use display::CLEAR_SCREEN;
use owo_colors::OwoColorize;
use scanner::Scanner;
use selector::{Selector, State};
use size::SizeAccumulator;
use std::io::{self, Write};
use std::process::ExitCode;
use terminal::RawMode;

fn main() -> ExitCode {
    let args = Args::parse_args();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // Validate the path exists
    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("Cannot access path '{}'", args.path.display()))?;

    if !path.is_dir() {
        anyhow::bail!("'{}' is not a directory", path.display());
    }

    let accumulator = SizeAccumulator::new()
        .with_threads(args.threads)
        .context("Failed to start worker threads")?
        .with_mode(args.size_mode());
    let scanner = Scanner::new(accumulator).with_progress(true);

    let mut result = scanner
        .find(&path)
        .with_context(|| format!("Failed to scan '{}'", path.display()))?;

    if result.is_empty() {
        println!("No node_modules directories found.");
        return Ok(());
    }

    let state = {
        let raw_mode = RawMode::enable()?;
        let mut stdout = io::stdout();
        let state = Selector::new(&mut result.entries).run(&mut stdout, terminal::read_intent);
        let restored = raw_mode.restore();
        let state = state?;
        restored?;
        state
    };

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", CLEAR_SCREEN)?;

    if state == State::Terminated {
        writeln!(stdout, "Operation cancelled.")?;
        return Ok(());
    }

    let selected = result.selected();
    if selected.is_empty() {
        writeln!(stdout, "Nothing selected for deletion.")?;
        return Ok(());
    }

    display::print_deletion_plan(&mut stdout, &selected)?;
    write!(stdout, "\nConfirm deletion (Y/N): ")?;
    stdout.flush()?;

    if !terminal::confirm(&mut io::stdin().lock())? {
        writeln!(stdout, "Operation cancelled.")?;
        return Ok(());
    }

    let deletions = cleaner::delete_all(&selected);
    display::print_deletion_report(&mut stdout, &deletions)?;
    Ok(())
}
