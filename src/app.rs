//! Dialog state and input handling.
//!
//! This module holds the state of one rating dialog while it is on screen
//! and turns user actions into a [`DialogOutcome`].

use apprate::{DialogConfiguration, DialogOutcome, ResourceTable, StringValue, UsageState};

use crate::event::Action;

/// The section of the dialog receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Star rating row
    Stars,
    /// Comment text box
    Comment,
    /// Button row
    Buttons,
}

/// The dialog buttons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Negative,
    Neutral,
    Positive,
}

/// State of the rating dialog.
pub struct App<'a> {
    /// Configuration being presented
    pub config: &'a DialogConfiguration,
    /// Resolves resource keys to texts and colors
    pub resources: &'a ResourceTable,
    /// Usage counters shown in the status bar
    pub usage: Option<UsageState>,
    /// Currently selected rating
    pub rating: u8,
    /// Comment box content
    pub comment: String,
    /// Section receiving input
    pub focus: Focus,
    /// Index into `buttons()`
    pub selected_button: usize,
}

impl<'a> App<'a> {
    /// Creates the dialog state with the configured defaults.
    pub fn new(
        config: &'a DialogConfiguration,
        resources: &'a ResourceTable,
        usage: Option<UsageState>,
    ) -> Self {
        let comment = config
            .texts()
            .default_comment
            .as_ref()
            .and_then(|text| text.resolve(resources))
            .unwrap_or_default();

        let mut app = Self {
            config,
            resources,
            usage,
            rating: config.default_rating(),
            comment,
            focus: Focus::Stars,
            selected_button: 0,
        };
        // Start on the positive button so Enter submits
        app.selected_button = app.buttons().len().saturating_sub(1);
        app
    }

    /// Resolves an optional text, treating unknown resources as unset.
    pub fn text(&self, value: Option<&StringValue>) -> Option<String> {
        value.and_then(|v| v.resolve(self.resources))
    }

    /// Buttons with a label, in display order.
    pub fn buttons(&self) -> Vec<(DialogButton, String)> {
        let texts = self.config.texts();
        [
            (DialogButton::Negative, texts.negative_button.as_ref()),
            (DialogButton::Neutral, texts.neutral_button.as_ref()),
            (
                DialogButton::Positive,
                self.config.positive_button_text(self.rating),
            ),
        ]
        .into_iter()
        .filter_map(|(button, label)| self.text(label).map(|label| (button, label)))
        .collect()
    }

    /// Whether the comment box is shown for the current rating.
    pub fn comment_visible(&self) -> bool {
        self.config.is_comment_visible(self.rating)
    }

    /// Escape closes the dialog unless it was made non-cancelable.
    pub fn is_cancelable(&self) -> bool {
        self.config.cancelable().unwrap_or(true)
    }

    /// Handles an action and returns the outcome once the dialog closes.
    pub fn handle_event(&mut self, action: Action) -> Option<DialogOutcome> {
        match action {
            Action::Quit => return Some(DialogOutcome::Dismissed),
            Action::Back => {
                if self.is_cancelable() {
                    return Some(DialogOutcome::Dismissed);
                }
            }
            Action::NextFocus => self.cycle_focus(true),
            Action::PreviousFocus => self.cycle_focus(false),
            Action::Enter => return self.confirm(),
            _ => match self.focus {
                Focus::Stars => self.handle_stars_action(action),
                Focus::Comment => self.handle_comment_action(action),
                Focus::Buttons => self.handle_buttons_action(action),
            },
        }
        None
    }

    fn handle_stars_action(&mut self, action: Action) {
        match action {
            Action::Left => self.set_rating(self.rating.saturating_sub(1)),
            Action::Right => self.set_rating(self.rating.saturating_add(1)),
            Action::Rate(rating) => self.set_rating(rating),
            _ => {}
        }
    }

    fn handle_comment_action(&mut self, action: Action) {
        match action {
            Action::Char(c) => self.comment.push(c),
            Action::Backspace => {
                self.comment.pop();
            }
            _ => {}
        }
    }

    fn handle_buttons_action(&mut self, action: Action) {
        let len = self.buttons().len();
        if len == 0 {
            return;
        }
        match action {
            Action::Left => {
                self.selected_button = if self.selected_button == 0 {
                    len - 1
                } else {
                    self.selected_button - 1
                };
            }
            Action::Right => {
                self.selected_button = (self.selected_button + 1) % len;
            }
            _ => {}
        }
    }

    /// Sets the rating, ignoring values above the star count.
    fn set_rating(&mut self, rating: u8) {
        if rating > self.config.number_of_stars() {
            return;
        }
        self.rating = rating;
        if self.focus == Focus::Comment && !self.comment_visible() {
            self.focus = Focus::Stars;
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::Stars];
        if self.comment_visible() {
            order.push(Focus::Comment);
        }
        order.push(Focus::Buttons);

        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    /// Enter on stars or comment jumps to the buttons; on a button it
    /// closes the dialog with that button's outcome.
    fn confirm(&mut self) -> Option<DialogOutcome> {
        if self.focus != Focus::Buttons {
            self.focus = Focus::Buttons;
            return None;
        }

        let buttons = self.buttons();
        let (button, _) = buttons.get(self.selected_button)?;
        Some(match button {
            DialogButton::Negative => DialogOutcome::Negative,
            DialogButton::Neutral => DialogOutcome::Neutral,
            DialogButton::Positive => DialogOutcome::Positive {
                rating: self.rating,
                comment: self.comment.clone(),
            },
        })
    }
}
