//! Terminal dialog host.
//!
//! Presents the rating dialog with ratatui and reports the user's choice
//! back to the rater.

use anyhow::{Context, Result};
use tracing::debug;

use apprate::{DialogConfiguration, DialogHost, DialogOutcome, ResourceTable, UsageState};

use crate::app::{App, Focus};
use crate::event::EventHandler;
use crate::ui;

/// Shows the dialog full-screen in the current terminal.
pub struct TerminalHost {
    resources: ResourceTable,
    /// Counters shown in the status bar
    usage: Option<UsageState>,
}

impl TerminalHost {
    pub fn new(resources: ResourceTable) -> Self {
        Self {
            resources,
            usage: None,
        }
    }

    /// Sets the usage counters displayed while the dialog is open.
    pub fn set_usage(&mut self, usage: UsageState) {
        self.usage = Some(usage);
    }
}

impl DialogHost for TerminalHost {
    fn present(&mut self, config: &DialogConfiguration) -> Result<DialogOutcome> {
        // Initialize the terminal
        let terminal = ratatui::init();

        let app = App::new(config, &self.resources, self.usage);
        let result = run_dialog(terminal, app);

        // Restore the terminal to its previous state
        ratatui::restore();

        result
    }
}

/// Dialog loop:
/// 1. Draw the current dialog state
/// 2. Handle user input events
/// 3. Repeat until a button or cancel closes the dialog
fn run_dialog(mut terminal: ratatui::DefaultTerminal, mut app: App) -> Result<DialogOutcome> {
    let event_handler = EventHandler::new();

    loop {
        terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("Failed to draw UI")?;

        // The comment box takes printable keys as text
        let event = if app.focus == Focus::Comment {
            event_handler.next_input()
        } else {
            event_handler.next()
        }
        .context("Failed to read terminal event")?;

        if let Some(action) = event {
            debug!(?action, "Dialog input");
            if let Some(outcome) = app.handle_event(action) {
                return Ok(outcome);
            }
        }
    }
}
