//! Interactive selection of directories to delete.
//!
//! A small state machine: the selector starts in [`State::Browsing`], and every
//! intent either moves the cursor, flips the entry under it, or leaves the loop
//! through [`State::Confirming`] or [`State::Terminated`]. Raw mode is the
//! caller's business; the selector only reads intents and writes frames.

use crate::display::{CLEAR_SCREEN, format_size};
use crate::entry::{DirectoryEntry, selected_size};
use crate::error::NpklError;
use owo_colors::OwoColorize;
use std::io::Write;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveUp,
    MoveDown,
    Toggle,
    Confirm,
    Cancel,
    /// Unmapped key or non-key event; just redraw
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Browsing,
    /// Selection frozen, waiting for the yes/no prompt
    Confirming,
    /// Cancelled, nothing will be deleted
    Terminated,
}

pub struct Selector<'a> {
    entries: &'a mut [DirectoryEntry],
    cursor: usize,
    state: State,
}

impl<'a> Selector<'a> {
    pub fn new(entries: &'a mut [DirectoryEntry]) -> Self {
        Self {
            entries,
            cursor: 0,
            state: State::Browsing,
        }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Total size of the currently selected entries
    pub fn selected_total(&self) -> u64 {
        selected_size(&self.entries[..])
    }

    /// Apply one intent. Intents after the loop has ended are ignored.
    pub fn apply(&mut self, intent: Intent) -> State {
        if self.state != State::Browsing {
            return self.state;
        }

        match intent {
            Intent::Cancel => self.state = State::Terminated,
            Intent::Confirm => self.state = State::Confirming,
            Intent::Toggle => {
                if let Some(entry) = self.entries.get_mut(self.cursor) {
                    entry.toggle();
                }
            }
            Intent::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            Intent::MoveDown => {
                let last = self.entries.len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            Intent::Ignore => {}
        }
        self.state
    }

    /// Draw the full list, cursor and running total.
    ///
    /// Lines end in `\r\n` since raw mode does not translate newlines.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), NpklError> {
        self.draw(out)
            .and_then(|()| out.flush())
            .map_err(|source| NpklError::Output { source })
    }

    fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", CLEAR_SCREEN)?;
        write!(out, "{}\r\n", "Found node_modules directories:".bold())?;
        write!(
            out,
            "{}\r\n\r\n",
            "Use up/down arrows to navigate, space to select, Enter to confirm".dimmed()
        )?;

        for (i, entry) in self.entries.iter().enumerate() {
            let cursor = if i == self.cursor { "> " } else { "  " };
            let mark = if entry.selected { "[✓]" } else { "[ ]" };
            write!(
                out,
                "{}{} {} ({})\r\n",
                cursor.cyan().bold(),
                mark,
                entry.path.display(),
                format_size(entry.size).green()
            )?;
        }

        write!(out, "\r\n{}\r\n", "-".repeat(40).dimmed())?;
        write!(
            out,
            "Total size of selected directories: {}\r\n",
            format_size(self.selected_total()).green().bold()
        )
    }

    /// Render, then read and apply intents until the user confirms or cancels.
    ///
    /// Returns the final state, either `Confirming` or `Terminated`.
    pub fn run<W, F>(&mut self, out: &mut W, mut next_intent: F) -> Result<State, NpklError>
    where
        W: Write,
        F: FnMut() -> Result<Intent, NpklError>,
    {
        self.render(out)?;
        loop {
            let intent = next_intent()?;
            match self.apply(intent) {
                State::Browsing => self.render(out)?,
                done => return Ok(done),
            }
        }
    }
}
