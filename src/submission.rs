//! Dialog outcomes and rating submission interpretation.

use serde::Serialize;

use crate::config::DialogConfiguration;

/// What the user did with the dialog, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Positive button: the selected rating and the comment box content.
    Positive { rating: u8, comment: String },
    /// Negative button: never ask again.
    Negative,
    /// Neutral button: remind me later.
    Neutral,
    /// Closed without pressing a button.
    Dismissed,
}

/// A confirmed rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingResult {
    pub rating: u8,
    /// Present only for ratings at or below the comment threshold.
    pub comment: Option<String>,
}

impl RatingResult {
    /// A rating above the comment threshold. Follow-up such as opening a
    /// store listing is up to the caller.
    pub fn is_positive_review(&self) -> bool {
        self.comment.is_none()
    }
}

/// Interprets a submitted rating: the comment is kept (possibly empty) iff
/// the rating is at or below the comment threshold.
pub fn interpret_submission(
    rating: u8,
    comment: impl Into<String>,
    config: &DialogConfiguration,
) -> RatingResult {
    let comment = if config.is_positive_review(rating) {
        None
    } else {
        Some(comment.into())
    };
    RatingResult { rating, comment }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_threshold(threshold: i32) -> DialogConfiguration {
        DialogConfiguration::builder()
            .default_threshold(threshold)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_above_threshold_drops_comment() {
        let result = interpret_submission(5, "great", &config_with_threshold(4));
        assert_eq!(result.comment, None);
        assert!(result.is_positive_review());
    }

    #[test]
    fn test_at_threshold_keeps_comment() {
        let result = interpret_submission(4, "meh", &config_with_threshold(4));
        assert_eq!(result.comment.as_deref(), Some("meh"));
    }

    #[test]
    fn test_empty_comment_is_kept_below_threshold() {
        let result = interpret_submission(1, "", &config_with_threshold(3));
        assert_eq!(result.comment, Some(String::new()));
        assert!(!result.is_positive_review());
    }

    #[test]
    fn test_comment_presence_matches_threshold_for_all_ratings() {
        for threshold in 0..=6 {
            let cfg = config_with_threshold(threshold);
            for rating in 0..=6u8 {
                let result = interpret_submission(rating, "x", &cfg);
                assert_eq!(result.comment.is_none(), i32::from(rating) > threshold);
            }
        }
    }
}
