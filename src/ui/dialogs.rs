//! Rating dialog rendering.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use apprate::constants::dialog;

use super::colors;
use super::utils::centered_rect;

/// Block cursor character for the comment box.
pub(crate) const BLOCK_CURSOR: &str = "█";

/// Comment box prompt indicator.
pub(crate) const INPUT_INDICATOR: &str = "› ";

const STAR_FILLED: &str = "★";
const STAR_EMPTY: &str = "☆";

/// Draws the rating dialog.
pub fn draw_rating_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(dialog::RATING_WIDTH, dialog::RATING_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let texts = app.config.texts();
    let dialog_colors = app.config.colors();
    let title = app.text(texts.title.as_ref()).unwrap_or_default();
    let title_color = colors::resolve(
        app.resources,
        dialog_colors.title_text.as_ref(),
        Color::White,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::PRIMARY))
        .border_set(symbols::border::DOUBLE)
        .title(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(title, Style::default().fg(title_color).bold()),
            Span::styled(" ", Style::default()),
        ]))
        .padding(Padding::uniform(1));

    let mut content = Vec::new();

    if let Some(description) = app.text(texts.description.as_ref()) {
        let color = colors::resolve(
            app.resources,
            dialog_colors.description_text.as_ref(),
            Color::White,
        );
        content.push(Line::from(Span::styled(description, Style::default().fg(color))));
        content.push(Line::from(""));
    }

    content.push(stars_line(app));

    // Note for the selected star, blank line keeps the layout stable
    let note = app.config.note_description(app.rating).unwrap_or_default();
    let note_color = colors::resolve(
        app.resources,
        dialog_colors.note_description_text.as_ref(),
        colors::ACCENT,
    );
    content.push(
        Line::from(Span::styled(note.to_string(), Style::default().fg(note_color).italic()))
            .alignment(Alignment::Center),
    );
    content.push(Line::from(""));

    if app.comment_visible() {
        content.push(comment_line(app));
        content.push(Line::from(""));
    }

    content.push(buttons_line(app));

    let widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(widget, area);
}

fn stars_line(app: &App) -> Line<'static> {
    let star_color = colors::resolve(
        app.resources,
        app.config.colors().star.as_ref(),
        colors::WARNING,
    );
    let focused = app.focus == Focus::Stars;

    let mut spans = Vec::new();
    for star in 1..=app.config.number_of_stars() {
        let symbol = if star <= app.rating { STAR_FILLED } else { STAR_EMPTY };
        let mut style = Style::default().fg(star_color);
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {symbol} "), style));
    }

    Line::from(spans).alignment(Alignment::Center)
}

fn comment_line(app: &App) -> Line<'static> {
    let dialog_colors = app.config.colors();
    let text_color = colors::resolve(
        app.resources,
        dialog_colors.comment_text.as_ref(),
        Color::White,
    );
    let background = colors::resolve(
        app.resources,
        dialog_colors.comment_background.as_ref(),
        Color::Reset,
    );
    let focused = app.focus == Focus::Comment;

    let mut spans = vec![Span::styled(
        format!("  {INPUT_INDICATOR}"),
        Style::default().fg(if focused { colors::PRIMARY } else { colors::MUTED }),
    )];

    if app.comment.is_empty() && !focused {
        let hint = app.text(app.config.texts().hint.as_ref()).unwrap_or_default();
        let hint_color = colors::resolve(
            app.resources,
            dialog_colors.hint_text.as_ref(),
            colors::MUTED,
        );
        spans.push(Span::styled(hint, Style::default().fg(hint_color).bg(background)));
    } else {
        spans.push(Span::styled(
            app.comment.clone(),
            Style::default().fg(text_color).bg(background),
        ));
    }

    if focused {
        spans.push(Span::styled(
            BLOCK_CURSOR,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    Line::from(spans)
}

fn buttons_line(app: &App) -> Line<'static> {
    let focused = app.focus == Focus::Buttons;
    let mut spans = Vec::new();

    for (i, (_, label)) in app.buttons().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("   ", Style::default()));
        }
        let style = if focused && i == app.selected_button {
            Style::default()
                .fg(colors::SELECTION_TEXT)
                .bg(colors::SELECTION)
                .bold()
        } else if i == app.selected_button {
            Style::default().fg(colors::KEY).bold()
        } else {
            Style::default().fg(colors::MUTED)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    Line::from(spans).alignment(Alignment::Right)
}
