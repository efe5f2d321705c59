//! Input validation for dialog configuration values.

use thiserror::Error;

use crate::constants::MAX_RATING;

/// A configuration value outside its allowed range.
///
/// These are programmer errors: they are raised at the offending builder
/// call and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("number of stars should be between 1 and {max}, got {value}")]
    NumberOfStars { value: i32, max: u8 },

    #[error("default rating should be between 0 and {max}, got {value}")]
    DefaultRating { value: i32, max: u8 },

    #[error("note descriptions cannot be empty")]
    EmptyNoteDescriptions,

    #[error("note descriptions can hold at most {max} entries, got {len}")]
    TooManyNoteDescriptions { len: usize, max: u8 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("{field} cannot be empty")]
    EmptyText { field: &'static str },
}

/// Validation result for a single value.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a star count.
pub fn validate_number_of_stars(value: i32) -> ValidationResult<u8> {
    if value < 1 || value > i32::from(MAX_RATING) {
        return Err(ValidationError::NumberOfStars {
            value,
            max: MAX_RATING,
        });
    }
    Ok(value as u8)
}

/// Validates a default rating against the current star count.
pub fn validate_default_rating(value: i32, number_of_stars: u8) -> ValidationResult<u8> {
    if value < 0 || value > i32::from(number_of_stars) {
        return Err(ValidationError::DefaultRating {
            value,
            max: number_of_stars,
        });
    }
    Ok(value as u8)
}

/// Validates a note-description list.
///
/// Rules:
/// - Must hold at least one entry
/// - Must hold at most `MAX_RATING` entries
pub fn validate_note_descriptions(list: &[String]) -> ValidationResult<()> {
    if list.is_empty() {
        return Err(ValidationError::EmptyNoteDescriptions);
    }
    if list.len() > usize::from(MAX_RATING) {
        return Err(ValidationError::TooManyNoteDescriptions {
            len: list.len(),
            max: MAX_RATING,
        });
    }
    Ok(())
}

/// Validates a count or day value that must not be negative.
pub fn validate_non_negative(field: &'static str, value: i32) -> ValidationResult<u32> {
    u32::try_from(value).map_err(|_| ValidationError::Negative { field, value })
}

/// Validates a literal display text.
pub fn validate_text(field: &'static str, text: &str) -> ValidationResult<()> {
    if text.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(())
}
