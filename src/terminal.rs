//! Raw mode handling and keyboard input.

use crate::error::NpklError;
use crate::selector::Intent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal};

/// Keeps the terminal in raw mode until restored or dropped.
///
/// The terminal is restored exactly once: either by [`RawMode::restore`] or,
/// if that was never called, when the guard is dropped.
pub struct RawMode {
    active: bool,
}

impl RawMode {
    /// Enter raw mode. Stdin must be a terminal.
    pub fn enable() -> Result<Self, NpklError> {
        if !io::stdin().is_terminal() {
            return Err(NpklError::TerminalConfig {
                source: io::Error::new(
                    io::ErrorKind::Unsupported,
                    "standard input is not a terminal",
                ),
            });
        }
        enable_raw_mode().map_err(|source| NpklError::TerminalConfig { source })?;
        Ok(Self { active: true })
    }

    /// Leave raw mode
    pub fn restore(mut self) -> Result<(), NpklError> {
        self.active = false;
        disable_raw_mode().map_err(|source| NpklError::TerminalConfig { source })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}

/// Block until the next terminal event and translate it
pub fn read_intent() -> Result<Intent, NpklError> {
    match event::read().map_err(|source| NpklError::Input { source })? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(intent_for(&key)),
        _ => Ok(Intent::Ignore),
    }
}

/// Map a key press to a selector intent
pub fn intent_for(key: &KeyEvent) -> Intent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Intent::Cancel,
            _ => Intent::Ignore,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Intent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Intent::MoveDown,
        KeyCode::Char(' ') => Intent::Toggle,
        KeyCode::Enter => Intent::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => Intent::Cancel,
        _ => Intent::Ignore,
    }
}

/// Read one line and accept only `y`/`Y` (surrounding whitespace ignored)
pub fn confirm<R: BufRead>(reader: &mut R) -> Result<bool, NpklError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|source| NpklError::Input { source })?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(intent_for(&key(KeyCode::Up)), Intent::MoveUp);
        assert_eq!(intent_for(&key(KeyCode::Down)), Intent::MoveDown);
        assert_eq!(intent_for(&key(KeyCode::Char('k'))), Intent::MoveUp);
        assert_eq!(intent_for(&key(KeyCode::Char('j'))), Intent::MoveDown);
    }

    #[test]
    fn test_toggle_confirm_cancel() {
        assert_eq!(intent_for(&key(KeyCode::Char(' '))), Intent::Toggle);
        assert_eq!(intent_for(&key(KeyCode::Enter)), Intent::Confirm);
        assert_eq!(intent_for(&key(KeyCode::Esc)), Intent::Cancel);
        assert_eq!(
            intent_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Intent::Cancel
        );
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(intent_for(&key(KeyCode::Char('x'))), Intent::Ignore);
        assert_eq!(intent_for(&key(KeyCode::Left)), Intent::Ignore);
        assert_eq!(intent_for(&key(KeyCode::Tab)), Intent::Ignore);
        assert_eq!(
            intent_for(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            Intent::Ignore
        );
    }

    #[test]
    fn test_confirm_accepts_only_y() {
        assert!(confirm(&mut Cursor::new("Y\n")).unwrap());
        assert!(confirm(&mut Cursor::new("y\r\n")).unwrap());
        assert!(!confirm(&mut Cursor::new("yes\n")).unwrap());
        assert!(!confirm(&mut Cursor::new("N\n")).unwrap());
        assert!(!confirm(&mut Cursor::new("\n")).unwrap());
        assert!(!confirm(&mut Cursor::new("")).unwrap());
    }
}
