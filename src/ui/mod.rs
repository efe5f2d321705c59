//! UI rendering module.
//!
//! This module handles the terminal rendering of the rating dialog using
//! Ratatui.

mod colors;
mod dialogs;
mod status;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use apprate::constants::dialog;

use dialogs::draw_rating_dialog;
use status::{draw_commands_bar, draw_status_bar};

pub use status::describe_usage;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create the main layout: content, commands bar, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0), // Dialog backdrop
            Constraint::Length(dialog::COMMANDS_BAR_HEIGHT),
            Constraint::Length(dialog::STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    draw_rating_dialog(frame, app);

    // Draw the commands bar (shows available keys)
    draw_commands_bar(frame, chunks[1], app);

    // Draw the status bar (shows usage counters)
    draw_status_bar(frame, chunks[2], app);
}
