//! Status bar and commands bar rendering.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use apprate::UsageState;

use crate::app::{App, Focus};

use super::colors;

/// Draws the commands bar showing available keys for the focused section.
pub fn draw_commands_bar(frame: &mut Frame, area: Rect, app: &App) {
    let commands = get_commands_for_focus(app.focus, app.is_cancelable());

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];

    for (i, (key, desc)) in commands.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::BORDER)));
        }
        spans.push(Span::styled(*key, Style::default().fg(colors::KEY).bold()));
        spans.push(Span::styled(" ", Style::default()));
        spans.push(Span::styled(*desc, Style::default().fg(colors::MUTED)));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER));

    let commands_widget = Paragraph::new(Line::from(spans)).block(block);

    frame.render_widget(commands_widget, area);
}

/// Returns the list of commands available for a focused section.
fn get_commands_for_focus(focus: Focus, cancelable: bool) -> Vec<(&'static str, &'static str)> {
    let mut commands = match focus {
        Focus::Stars => vec![
            ("h/l", "rate"),
            ("1-6", "set"),
            ("Tab", "next"),
            ("Enter", "buttons"),
        ],
        Focus::Comment => vec![("type", "comment"), ("Tab", "next"), ("Enter", "buttons")],
        Focus::Buttons => vec![("h/l", "select"), ("Tab", "next"), ("Enter", "press")],
    };
    if cancelable {
        commands.push(("Esc", "close"));
    }
    commands
}

/// Draws the status bar with the persisted usage counters.
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match &app.usage {
        Some(usage) => (
            format!(" {} ", describe_usage(usage)),
            Style::default().fg(colors::SUCCESS),
        ),
        None => (" Preview".to_string(), Style::default().fg(colors::MUTED)),
    };

    let status = Paragraph::new(text).style(style);
    frame.render_widget(status, area);
}

/// Formats usage counters for display.
pub fn describe_usage(usage: &UsageState) -> String {
    let installed =
        format_timestamp(usage.install_timestamp).unwrap_or_else(|| "never".to_string());
    let mut text = format!("Launches: {} · Installed: {}", usage.launch_count, installed);
    if let Some(reminded) = format_timestamp(usage.last_remind_timestamp) {
        text.push_str(&format!(" · Reminded: {reminded}"));
    }
    if usage.user_opt_out {
        text.push_str(" · Opted out");
    }
    text
}

/// Formats a millisecond timestamp; 0 means "not recorded".
fn format_timestamp(millis: i64) -> Option<String> {
    if millis == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
}
