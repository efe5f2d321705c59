//! Event handling module.
//!
//! This module handles keyboard and terminal events using crossterm.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use apprate::constants::POLL_TIMEOUT;

/// Represents the different actions a user can take in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave immediately (Ctrl+C)
    Quit,
    /// Lower the rating / select the previous button
    Left,
    /// Raise the rating / select the next button
    Right,
    /// Set the rating directly
    Rate(u8),
    /// Move focus to the next section
    NextFocus,
    /// Move focus to the previous section
    PreviousFocus,
    /// Confirm the current selection
    Enter,
    /// Cancel the dialog
    Back,
    /// Character input (comment box)
    Char(char),
    /// Backspace key (comment box)
    Backspace,
}

/// Handles terminal events and converts them to dialog actions.
pub struct EventHandler {
    /// Timeout for polling events
    poll_timeout: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default settings.
    pub fn new() -> Self {
        Self {
            poll_timeout: POLL_TIMEOUT,
        }
    }

    /// Polls for the next event and converts it to an Action.
    ///
    /// Returns Ok(None) if no event is available within the timeout.
    pub fn next(&self) -> io::Result<Option<Action>> {
        Ok(self.poll_key()?.and_then(|key| self.key_to_action(key)))
    }

    /// Polls for comment-box events, where printable keys are text.
    pub fn next_input(&self) -> io::Result<Option<Action>> {
        Ok(self.poll_key()?.and_then(|key| self.key_to_input_action(key)))
    }

    fn poll_key(&self) -> io::Result<Option<KeyEvent>> {
        if event::poll(self.poll_timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Only process key press events (not releases)
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }

    /// Converts a key event to an input-mode action.
    pub(crate) fn key_to_input_action(&self, key: KeyEvent) -> Option<Action> {
        if is_ctrl_c(&key) {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::NextFocus),
            KeyCode::BackTab => Some(Action::PreviousFocus),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Char(c)),
            _ => None,
        }
    }

    /// Converts a key event to a navigation action.
    pub(crate) fn key_to_action(&self, key: KeyEvent) -> Option<Action> {
        if is_ctrl_c(&key) {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Right),
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => Some(Action::NextFocus),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => Some(Action::PreviousFocus),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Back),
            KeyCode::Char(c) => c.to_digit(10).map(|d| Action::Rate(d as u8)),
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
