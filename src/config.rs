//! Dialog configuration model.
//!
//! A [`DialogConfigurationBuilder`] validates every value at the point it is
//! set and produces an immutable [`DialogConfiguration`] consumed by both the
//! eligibility engine and the dialog host. [`DialogOptions`] is the
//! deserializable form of the same builder.

use serde::Deserialize;

use crate::constants::defaults;
use crate::text::{ResourceKey, StringValue};
use crate::validation::{
    validate_default_rating, validate_non_negative, validate_note_descriptions,
    validate_number_of_stars, validate_text, ValidationResult,
};

/// Texts shown by the dialog. Unset entries are left to the host; a host
/// only shows a button whose label is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogTexts {
    pub title: Option<StringValue>,
    pub description: Option<StringValue>,
    pub hint: Option<StringValue>,
    pub default_comment: Option<StringValue>,
    pub positive_button: Option<StringValue>,
    pub negative_button: Option<StringValue>,
    pub neutral_button: Option<StringValue>,
    /// Replaces the positive label while the rating is above the comment
    /// threshold.
    pub positive_review_button: Option<StringValue>,
}

/// Per-element colors, as resource keys resolved by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DialogColors {
    pub star: Option<ResourceKey>,
    pub note_description_text: Option<ResourceKey>,
    pub title_text: Option<ResourceKey>,
    pub description_text: Option<ResourceKey>,
    pub hint_text: Option<ResourceKey>,
    pub comment_text: Option<ResourceKey>,
    pub comment_background: Option<ResourceKey>,
}

/// Immutable dialog configuration. Obtain one through
/// [`DialogConfiguration::builder`] or [`build_configuration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfiguration {
    number_of_stars: u8,
    default_rating: u8,
    comment_threshold: u32,
    after_install_days: u32,
    number_of_launches_required: u32,
    remind_interval_days: u32,
    note_descriptions: Option<Vec<String>>,
    comment_input_enabled: bool,
    cancelable: Option<bool>,
    canceled_on_touch_outside: Option<bool>,
    window_animation: Option<ResourceKey>,
    texts: DialogTexts,
    colors: DialogColors,
}

impl DialogConfiguration {
    /// Starts a builder populated with defaults.
    pub fn builder() -> DialogConfigurationBuilder {
        DialogConfigurationBuilder::new()
    }

    pub fn number_of_stars(&self) -> u8 {
        self.number_of_stars
    }

    pub fn default_rating(&self) -> u8 {
        self.default_rating
    }

    /// Ratings at or below this value request a comment.
    pub fn comment_threshold(&self) -> u32 {
        self.comment_threshold
    }

    pub fn after_install_days(&self) -> u32 {
        self.after_install_days
    }

    pub fn number_of_launches_required(&self) -> u32 {
        self.number_of_launches_required
    }

    pub fn remind_interval_days(&self) -> u32 {
        self.remind_interval_days
    }

    pub fn note_descriptions(&self) -> Option<&[String]> {
        self.note_descriptions.as_deref()
    }

    pub fn comment_input_enabled(&self) -> bool {
        self.comment_input_enabled
    }

    /// None leaves the decision to the host's platform default.
    pub fn cancelable(&self) -> Option<bool> {
        self.cancelable
    }

    pub fn canceled_on_touch_outside(&self) -> Option<bool> {
        self.canceled_on_touch_outside
    }

    pub fn window_animation(&self) -> Option<&ResourceKey> {
        self.window_animation.as_ref()
    }

    pub fn texts(&self) -> &DialogTexts {
        &self.texts
    }

    pub fn colors(&self) -> &DialogColors {
        &self.colors
    }

    /// Returns the note shown for a 1-based rating, if notes are configured.
    pub fn note_description(&self, rating: u8) -> Option<&str> {
        let index = usize::from(rating.checked_sub(1)?);
        self.note_descriptions
            .as_ref()
            .and_then(|notes| notes.get(index))
            .map(String::as_str)
    }

    /// Whether a rating lies above the comment threshold.
    pub fn is_positive_review(&self, rating: u8) -> bool {
        u32::from(rating) > self.comment_threshold
    }

    /// Whether the comment box should be offered for the given rating.
    pub fn is_comment_visible(&self, rating: u8) -> bool {
        self.comment_input_enabled && !self.is_positive_review(rating)
    }

    /// Label of the positive button for the given rating.
    pub fn positive_button_text(&self, rating: u8) -> Option<&StringValue> {
        if self.is_positive_review(rating) {
            if let Some(text) = &self.texts.positive_review_button {
                return Some(text);
            }
        }
        self.texts.positive_button.as_ref()
    }
}

impl Default for DialogConfiguration {
    fn default() -> Self {
        Self {
            number_of_stars: defaults::NUMBER_OF_STARS,
            default_rating: defaults::RATING,
            comment_threshold: u32::from(defaults::COMMENT_THRESHOLD),
            after_install_days: defaults::AFTER_INSTALL_DAYS,
            number_of_launches_required: defaults::NUMBER_OF_LAUNCHES,
            remind_interval_days: defaults::REMIND_INTERVAL_DAYS,
            note_descriptions: None,
            comment_input_enabled: true,
            cancelable: None,
            canceled_on_touch_outside: None,
            window_animation: None,
            texts: DialogTexts::default(),
            colors: DialogColors::default(),
        }
    }
}

/// Validating builder for [`DialogConfiguration`].
///
/// Methods that check their input return `ValidationResult<Self>` so calls
/// chain with `?`.
#[derive(Debug, Clone)]
pub struct DialogConfigurationBuilder {
    config: DialogConfiguration,
    /// Explicitly requested default rating, checked again at build time.
    default_rating: Option<u8>,
}

impl DialogConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            config: DialogConfiguration::default(),
            default_rating: None,
        }
    }

    /// Sets the number of stars (1..=6).
    pub fn number_of_stars(mut self, n: i32) -> ValidationResult<Self> {
        self.config.number_of_stars = validate_number_of_stars(n)?;
        Ok(self)
    }

    /// Sets the preselected rating (0..=current number of stars).
    pub fn default_rating(mut self, rating: i32) -> ValidationResult<Self> {
        let rating = validate_default_rating(rating, self.current_number_of_stars())?;
        self.default_rating = Some(rating);
        Ok(self)
    }

    /// Sets one note per star. The star count follows the list length.
    pub fn note_descriptions<I, S>(mut self, notes: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let notes: Vec<String> = notes.into_iter().map(Into::into).collect();
        validate_note_descriptions(&notes)?;
        self.config.number_of_stars = notes.len() as u8;
        self.config.note_descriptions = Some(notes);
        Ok(self)
    }

    pub fn default_threshold(mut self, threshold: i32) -> ValidationResult<Self> {
        self.config.comment_threshold = validate_non_negative("comment threshold", threshold)?;
        Ok(self)
    }

    pub fn after_install_days(mut self, days: i32) -> ValidationResult<Self> {
        self.config.after_install_days = validate_non_negative("after install days", days)?;
        Ok(self)
    }

    pub fn number_of_launches(mut self, launches: i32) -> ValidationResult<Self> {
        self.config.number_of_launches_required =
            validate_non_negative("number of launches", launches)?;
        Ok(self)
    }

    pub fn remind_interval(mut self, days: i32) -> ValidationResult<Self> {
        self.config.remind_interval_days = validate_non_negative("remind interval", days)?;
        Ok(self)
    }

    pub fn title(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.title = Some(checked_text("title", value.into())?);
        Ok(self)
    }

    pub fn description(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.description = Some(checked_text("description", value.into())?);
        Ok(self)
    }

    pub fn hint(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.hint = Some(checked_text("hint", value.into())?);
        Ok(self)
    }

    pub fn default_comment(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.default_comment = Some(checked_text("default comment", value.into())?);
        Ok(self)
    }

    pub fn positive_button_text(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.positive_button =
            Some(checked_text("positive button text", value.into())?);
        Ok(self)
    }

    pub fn negative_button_text(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.negative_button =
            Some(checked_text("negative button text", value.into())?);
        Ok(self)
    }

    pub fn neutral_button_text(mut self, value: impl Into<StringValue>) -> ValidationResult<Self> {
        self.config.texts.neutral_button = Some(checked_text("neutral button text", value.into())?);
        Ok(self)
    }

    pub fn positive_review_button_text(
        mut self,
        value: impl Into<StringValue>,
    ) -> ValidationResult<Self> {
        self.config.texts.positive_review_button =
            Some(checked_text("positive review button text", value.into())?);
        Ok(self)
    }

    pub fn comment_input_enabled(mut self, enabled: bool) -> Self {
        self.config.comment_input_enabled = enabled;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.config.cancelable = Some(cancelable);
        self
    }

    pub fn canceled_on_touch_outside(mut self, cancel: bool) -> Self {
        self.config.canceled_on_touch_outside = Some(cancel);
        self
    }

    pub fn window_animation(mut self, animation: ResourceKey) -> Self {
        self.config.window_animation = Some(animation);
        self
    }

    /// Replaces all color keys at once.
    pub fn colors(mut self, colors: DialogColors) -> Self {
        self.config.colors = colors;
        self
    }

    pub fn star_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.star = Some(color);
        self
    }

    pub fn title_text_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.title_text = Some(color);
        self
    }

    pub fn description_text_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.description_text = Some(color);
        self
    }

    pub fn note_description_text_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.note_description_text = Some(color);
        self
    }

    pub fn hint_text_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.hint_text = Some(color);
        self
    }

    pub fn comment_text_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.comment_text = Some(color);
        self
    }

    pub fn comment_background_color(mut self, color: ResourceKey) -> Self {
        self.config.colors.comment_background = Some(color);
        self
    }

    /// Checks cross-field invariants and freezes the configuration.
    pub fn build(self) -> ValidationResult<DialogConfiguration> {
        let mut config = self.config;
        let number_of_stars = config
            .note_descriptions
            .as_ref()
            .map_or(config.number_of_stars, |notes| notes.len() as u8);
        config.number_of_stars = number_of_stars;

        config.default_rating = match self.default_rating {
            Some(rating) => validate_default_rating(i32::from(rating), number_of_stars)?,
            None => defaults::RATING.min(number_of_stars),
        };

        Ok(config)
    }

    fn current_number_of_stars(&self) -> u8 {
        self.config
            .note_descriptions
            .as_ref()
            .map_or(self.config.number_of_stars, |notes| notes.len() as u8)
    }
}

impl Default for DialogConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_text(field: &'static str, value: StringValue) -> ValidationResult<StringValue> {
    if let StringValue::Literal(text) = &value {
        validate_text(field, text)?;
    }
    Ok(value)
}

/// Deserializable dialog options, e.g. the `[dialog]` table of a TOML file.
///
/// Numbers are signed so out-of-range input reaches validation instead of
/// failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialogOptions {
    pub number_of_stars: Option<i32>,
    pub default_rating: Option<i32>,
    pub comment_threshold: Option<i32>,
    pub after_install_days: Option<i32>,
    pub number_of_launches: Option<i32>,
    pub remind_interval_days: Option<i32>,
    pub note_descriptions: Option<Vec<String>>,
    pub comment_input_enabled: Option<bool>,
    pub cancelable: Option<bool>,
    pub canceled_on_touch_outside: Option<bool>,
    pub window_animation: Option<ResourceKey>,
    pub title: Option<StringValue>,
    pub description: Option<StringValue>,
    pub hint: Option<StringValue>,
    pub default_comment: Option<StringValue>,
    pub positive_button: Option<StringValue>,
    pub negative_button: Option<StringValue>,
    pub neutral_button: Option<StringValue>,
    pub positive_review_button: Option<StringValue>,
    pub colors: DialogColors,
}

/// Builds a configuration from options.
///
/// The star count (or note descriptions) is applied before the default
/// rating so the outcome never depends on field order.
pub fn build_configuration(options: &DialogOptions) -> ValidationResult<DialogConfiguration> {
    let mut builder = DialogConfiguration::builder();

    if let Some(n) = options.number_of_stars {
        builder = builder.number_of_stars(n)?;
    }
    if let Some(notes) = &options.note_descriptions {
        builder = builder.note_descriptions(notes.iter().cloned())?;
    }
    if let Some(rating) = options.default_rating {
        builder = builder.default_rating(rating)?;
    }
    if let Some(threshold) = options.comment_threshold {
        builder = builder.default_threshold(threshold)?;
    }
    if let Some(days) = options.after_install_days {
        builder = builder.after_install_days(days)?;
    }
    if let Some(launches) = options.number_of_launches {
        builder = builder.number_of_launches(launches)?;
    }
    if let Some(days) = options.remind_interval_days {
        builder = builder.remind_interval(days)?;
    }

    if let Some(value) = &options.title {
        builder = builder.title(value.clone())?;
    }
    if let Some(value) = &options.description {
        builder = builder.description(value.clone())?;
    }
    if let Some(value) = &options.hint {
        builder = builder.hint(value.clone())?;
    }
    if let Some(value) = &options.default_comment {
        builder = builder.default_comment(value.clone())?;
    }
    if let Some(value) = &options.positive_button {
        builder = builder.positive_button_text(value.clone())?;
    }
    if let Some(value) = &options.negative_button {
        builder = builder.negative_button_text(value.clone())?;
    }
    if let Some(value) = &options.neutral_button {
        builder = builder.neutral_button_text(value.clone())?;
    }
    if let Some(value) = &options.positive_review_button {
        builder = builder.positive_review_button_text(value.clone())?;
    }

    if let Some(enabled) = options.comment_input_enabled {
        builder = builder.comment_input_enabled(enabled);
    }
    if let Some(cancelable) = options.cancelable {
        builder = builder.cancelable(cancelable);
    }
    if let Some(cancel) = options.canceled_on_touch_outside {
        builder = builder.canceled_on_touch_outside(cancel);
    }
    if let Some(animation) = &options.window_animation {
        builder = builder.window_animation(animation.clone());
    }

    builder.colors(options.colors.clone()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_defaults() {
        let config = DialogConfiguration::builder().build().unwrap();
        assert_eq!(config.number_of_stars(), 6);
        assert_eq!(config.default_rating(), 4);
        assert_eq!(config.comment_threshold(), 3);
        assert_eq!(config.after_install_days(), 10);
        assert_eq!(config.number_of_launches_required(), 10);
        assert_eq!(config.remind_interval_days(), 1);
        assert!(config.comment_input_enabled());
        assert_eq!(config.cancelable(), None);
    }

    #[test]
    fn test_star_count_out_of_range() {
        assert!(DialogConfiguration::builder().number_of_stars(0).is_err());
        assert!(DialogConfiguration::builder().number_of_stars(7).is_err());
    }

    #[test]
    fn test_default_rating_checked_against_stars() {
        let builder = DialogConfiguration::builder().number_of_stars(3).unwrap();
        assert_eq!(
            builder.default_rating(4).unwrap_err(),
            ValidationError::DefaultRating { value: 4, max: 3 }
        );
    }

    #[test]
    fn test_implicit_default_rating_clamped_to_stars() {
        let config = DialogConfiguration::builder()
            .number_of_stars(3)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.default_rating(), 3);
    }

    #[test]
    fn test_explicit_rating_rechecked_at_build() {
        let result = DialogConfiguration::builder()
            .default_rating(5)
            .unwrap()
            .number_of_stars(2)
            .unwrap()
            .build();
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DefaultRating { value: 5, max: 2 }
        );
    }

    #[test]
    fn test_note_descriptions_override_star_count() {
        let config = DialogConfiguration::builder()
            .note_descriptions(["Very bad", "Not good", "Quite ok"])
            .unwrap()
            .number_of_stars(6)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.number_of_stars(), 3);
        assert_eq!(config.default_rating(), 3);
        assert_eq!(config.note_description(1), Some("Very bad"));
        assert_eq!(config.note_description(3), Some("Quite ok"));
        assert_eq!(config.note_description(0), None);
        assert_eq!(config.note_description(4), None);
    }

    #[test]
    fn test_note_descriptions_rejected() {
        let empty: [&str; 0] = [];
        assert!(DialogConfiguration::builder().note_descriptions(empty).is_err());
        assert!(DialogConfiguration::builder()
            .note_descriptions(["1", "2", "3", "4", "5", "6", "7"])
            .is_err());
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(DialogConfiguration::builder().default_threshold(-1).is_err());
        assert!(DialogConfiguration::builder().after_install_days(-1).is_err());
        assert!(DialogConfiguration::builder().number_of_launches(-1).is_err());
        assert!(DialogConfiguration::builder().remind_interval(-1).is_err());
    }

    #[test]
    fn test_empty_literal_text_rejected() {
        let err = DialogConfiguration::builder().title("").unwrap_err();
        assert_eq!(err, ValidationError::EmptyText { field: "title" });
    }

    #[test]
    fn test_last_text_setter_wins() {
        let config = DialogConfiguration::builder()
            .title("Rate us")
            .unwrap()
            .title(ResourceKey::new("rate.title"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.texts().title,
            Some(StringValue::Resource(ResourceKey::new("rate.title")))
        );
    }

    #[test]
    fn test_comment_visibility_follows_threshold() {
        let config = DialogConfiguration::builder()
            .default_threshold(3)
            .unwrap()
            .build()
            .unwrap();
        assert!(config.is_comment_visible(3));
        assert!(!config.is_comment_visible(4));

        let disabled = DialogConfiguration::builder()
            .comment_input_enabled(false)
            .build()
            .unwrap();
        assert!(!disabled.is_comment_visible(1));
    }

    #[test]
    fn test_positive_review_button_label() {
        let config = DialogConfiguration::builder()
            .positive_button_text("Send feedback")
            .unwrap()
            .positive_review_button_text("Rate in store")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            config.positive_button_text(2),
            Some(&StringValue::from("Send feedback"))
        );
        assert_eq!(
            config.positive_button_text(5),
            Some(&StringValue::from("Rate in store"))
        );
    }

    #[test]
    fn test_color_setters() {
        let config = DialogConfiguration::builder()
            .note_description_text_color(ResourceKey::new("note"))
            .hint_text_color(ResourceKey::new("hint"))
            .comment_text_color(ResourceKey::new("comment"))
            .comment_background_color(ResourceKey::new("comment_bg"))
            .build()
            .unwrap();

        let colors = config.colors();
        assert_eq!(colors.note_description_text, Some(ResourceKey::new("note")));
        assert_eq!(colors.hint_text, Some(ResourceKey::new("hint")));
        assert_eq!(colors.comment_text, Some(ResourceKey::new("comment")));
        assert_eq!(colors.comment_background, Some(ResourceKey::new("comment_bg")));
        assert_eq!(colors.star, None);
    }

    #[test]
    fn test_build_configuration_from_toml() {
        let options: DialogOptions = toml::from_str(
            r#"
            default_rating = 2
            number_of_launches = 3
            note_descriptions = ["Very bad", "Not good", "Quite ok", "Very good", "Excellent"]
            title = { resource = "rate.title" }
            positive_button = { literal = "Submit" }

            [colors]
            star = "star"
            "#,
        )
        .unwrap();

        let config = build_configuration(&options).unwrap();
        assert_eq!(config.number_of_stars(), 5);
        assert_eq!(config.default_rating(), 2);
        assert_eq!(config.number_of_launches_required(), 3);
        assert_eq!(config.colors().star, Some(ResourceKey::new("star")));
    }

    #[test]
    fn test_build_configuration_rejects_out_of_range() {
        let options = DialogOptions {
            number_of_stars: Some(7),
            ..Default::default()
        };
        assert!(build_configuration(&options).is_err());

        let options = DialogOptions {
            number_of_stars: Some(6),
            default_rating: Some(7),
            ..Default::default()
        };
        assert!(build_configuration(&options).is_err());

        let options = DialogOptions {
            remind_interval_days: Some(-5),
            ..Default::default()
        };
        assert!(build_configuration(&options).is_err());
    }
}
