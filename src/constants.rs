//! Library-wide constants.
//!
//! Centralizes rating limits, default heuristics and persistence keys.

use std::time::Duration;

/// Maximum number of stars a dialog can show.
pub const MAX_RATING: u8 = 6;

/// Milliseconds in one day. Day thresholds are literal elapsed time.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Default values applied by the configuration builder.
pub mod defaults {
    /// Stars shown when none are configured.
    pub const NUMBER_OF_STARS: u8 = super::MAX_RATING;
    /// Preselected rating.
    pub const RATING: u8 = 4;
    /// Ratings at or below this value ask for a comment.
    pub const COMMENT_THRESHOLD: u8 = 3;
    /// Days that must pass after installation before prompting.
    pub const AFTER_INSTALL_DAYS: u32 = 10;
    /// Launches required before prompting.
    pub const NUMBER_OF_LAUNCHES: u32 = 10;
    /// Days to wait after "remind me later".
    pub const REMIND_INTERVAL_DAYS: u32 = 1;
}

/// Preference keys. All keys share the `apprate.` namespace so they never
/// collide with host application settings.
pub mod keys {
    pub const NAMESPACE: &str = "apprate.";
    pub const IS_FIRST_LAUNCH: &str = "apprate.is_first_launch";
    pub const INSTALL_TIMESTAMP: &str = "apprate.install_timestamp";
    pub const LAUNCH_COUNT: &str = "apprate.launch_count";
    pub const LAST_REMIND_TIMESTAMP: &str = "apprate.last_remind_timestamp";
    pub const USER_OPT_OUT: &str = "apprate.user_opt_out";
}

/// File names inside the data directory.
pub mod files {
    /// Persisted usage counters.
    pub const PREFERENCES: &str = "preferences.json";
    /// Log file prefix for the rolling appender.
    pub const LOG_PREFIX: &str = "apprate";
}

/// Event polling timeout - balances responsiveness with CPU usage.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Dialog dimensions (percentages of screen size).
pub mod dialog {
    /// Rating dialog width percentage.
    pub const RATING_WIDTH: u16 = 60;
    /// Rating dialog height percentage.
    pub const RATING_HEIGHT: u16 = 70;
    /// Commands bar height.
    pub const COMMANDS_BAR_HEIGHT: u16 = 3;
    /// Status bar height.
    pub const STATUS_BAR_HEIGHT: u16 = 1;
}
