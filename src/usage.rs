//! Usage state and the recorder transitions applied on lifecycle events.
//!
//! Transitions are pure functions over [`UsageState`]; [`load`] and [`save`]
//! move the state in and out of a [`PreferenceStore`].

use serde::Serialize;
use tracing::debug;

use crate::constants::keys;
use crate::store::{Preference, PreferenceStore, StorageError};

/// Persisted counters and flags that drive prompt eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageState {
    pub is_first_launch: bool,
    /// Milliseconds since the Unix epoch; 0 until the first launch.
    pub install_timestamp: i64,
    pub launch_count: u32,
    /// Milliseconds since the Unix epoch; 0 if the user never deferred.
    pub last_remind_timestamp: i64,
    /// Set when the user declined permanently.
    pub user_opt_out: bool,
}

impl Default for UsageState {
    fn default() -> Self {
        Self {
            is_first_launch: true,
            install_timestamp: 0,
            launch_count: 0,
            last_remind_timestamp: 0,
            user_opt_out: false,
        }
    }
}

/// Records one app launch.
///
/// The first launch stamps the install time. Every call increments the
/// launch count, so callers invoke this exactly once per launch.
pub fn record_launch(state: UsageState, now: i64) -> UsageState {
    let mut next = state;
    if state.install_timestamp == 0 {
        next.install_timestamp = now;
    }
    next.is_first_launch = false;
    next.launch_count = state.launch_count.saturating_add(1);
    debug!(
        launch_count = next.launch_count,
        install_timestamp = next.install_timestamp,
        "Recorded launch"
    );
    next
}

/// Marks the user as having declined permanently.
pub fn record_opt_out(state: UsageState) -> UsageState {
    debug!("Recorded opt-out");
    UsageState {
        user_opt_out: true,
        ..state
    }
}

/// Starts the remind-later cool-down at `now`.
pub fn record_remind_later(state: UsageState, now: i64) -> UsageState {
    debug!(last_remind_timestamp = now, "Recorded remind later");
    UsageState {
        last_remind_timestamp: now,
        ..state
    }
}

/// Allows prompting again after an opt-out, keeping all counters.
pub fn clear_opt_out(state: UsageState) -> UsageState {
    UsageState {
        user_opt_out: false,
        ..state
    }
}

/// Returns the state of a fresh install.
pub fn reset_usage() -> UsageState {
    UsageState::default()
}

/// Reads the usage state from a store; missing keys take their defaults.
pub fn load(store: &dyn PreferenceStore) -> Result<UsageState, StorageError> {
    let defaults = UsageState::default();

    let launch_count = match store.get_i64(keys::LAUNCH_COUNT)? {
        Some(count) => u32::try_from(count).map_err(|_| StorageError::TypeMismatch {
            key: keys::LAUNCH_COUNT.to_string(),
        })?,
        None => defaults.launch_count,
    };

    Ok(UsageState {
        is_first_launch: store
            .get_bool(keys::IS_FIRST_LAUNCH)?
            .unwrap_or(defaults.is_first_launch),
        install_timestamp: store
            .get_i64(keys::INSTALL_TIMESTAMP)?
            .unwrap_or(defaults.install_timestamp),
        launch_count,
        last_remind_timestamp: store
            .get_i64(keys::LAST_REMIND_TIMESTAMP)?
            .unwrap_or(defaults.last_remind_timestamp),
        user_opt_out: store
            .get_bool(keys::USER_OPT_OUT)?
            .unwrap_or(defaults.user_opt_out),
    })
}

/// Writes every field of the usage state to a store in one batch.
pub fn save(store: &mut dyn PreferenceStore, state: &UsageState) -> Result<(), StorageError> {
    store.put_all(&[
        (keys::IS_FIRST_LAUNCH, Preference::Bool(state.is_first_launch)),
        (keys::INSTALL_TIMESTAMP, Preference::I64(state.install_timestamp)),
        (keys::LAUNCH_COUNT, Preference::I64(i64::from(state.launch_count))),
        (
            keys::LAST_REMIND_TIMESTAMP,
            Preference::I64(state.last_remind_timestamp),
        ),
        (keys::USER_OPT_OUT, Preference::Bool(state.user_opt_out)),
    ])
}
