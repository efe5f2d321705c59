//! Prompt-eligibility engine.
//!
//! Decides whether the rating prompt should be shown now. Every gate is an
//! inclusive comparison; day thresholds are literal elapsed milliseconds,
//! not calendar days.

use serde::Serialize;

use crate::config::DialogConfiguration;
use crate::constants::MILLIS_PER_DAY;
use crate::usage::UsageState;

/// Outcome of each gate, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    /// The user has not declined permanently.
    pub not_opted_out: bool,
    pub launches_reached: bool,
    pub install_age_reached: bool,
    pub remind_interval_elapsed: bool,
}

impl EligibilityReport {
    /// True when every gate passes.
    pub fn is_eligible(&self) -> bool {
        self.not_opted_out
            && self.launches_reached
            && self.install_age_reached
            && self.remind_interval_elapsed
    }
}

/// Evaluates every gate without side effects.
pub fn evaluate(usage: &UsageState, config: &DialogConfiguration, now: i64) -> EligibilityReport {
    EligibilityReport {
        not_opted_out: !usage.user_opt_out,
        launches_reached: usage.launch_count >= config.number_of_launches_required(),
        install_age_reached: days_elapsed(
            usage.install_timestamp,
            config.after_install_days(),
            now,
        ),
        remind_interval_elapsed: days_elapsed(
            usage.last_remind_timestamp,
            config.remind_interval_days(),
            now,
        ),
    }
}

/// Returns true when the prompt should be shown at `now`.
pub fn should_prompt(usage: &UsageState, config: &DialogConfiguration, now: i64) -> bool {
    evaluate(usage, config, now).is_eligible()
}

/// A clock that stepped backwards counts as no time elapsed, so a zero-day
/// threshold always passes.
fn days_elapsed(since: i64, days: u32, now: i64) -> bool {
    let threshold = i64::from(days) * MILLIS_PER_DAY;
    now.saturating_sub(since).max(0) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{record_launch, record_opt_out, record_remind_later, reset_usage};

    const NOW: i64 = 1_700_000_000_000;

    fn config(launches: i32, install_days: i32, remind_days: i32) -> DialogConfiguration {
        DialogConfiguration::builder()
            .number_of_launches(launches)
            .unwrap()
            .after_install_days(install_days)
            .unwrap()
            .remind_interval(remind_days)
            .unwrap()
            .build()
            .unwrap()
    }

    fn launched(times: u32, at: i64) -> UsageState {
        (0..times).fold(reset_usage(), |state, _| record_launch(state, at))
    }

    #[test]
    fn test_zero_thresholds_always_pass() {
        let cfg = config(0, 0, 0);
        assert!(should_prompt(&reset_usage(), &cfg, NOW));
    }

    #[test]
    fn test_zero_thresholds_pass_when_clock_goes_back() {
        let cfg = config(0, 0, 0);
        let state = record_remind_later(launched(1, NOW), NOW);

        let report = evaluate(&state, &cfg, NOW - 1);
        assert!(report.install_age_reached);
        assert!(report.remind_interval_elapsed);
        assert!(should_prompt(&state, &cfg, NOW - 1));
    }

    #[test]
    fn test_clock_going_back_does_not_satisfy_day_threshold() {
        let cfg = config(0, 1, 0);
        let state = launched(1, NOW);
        assert!(!should_prompt(&state, &cfg, NOW - MILLIS_PER_DAY));
    }

    #[test]
    fn test_opt_out_blocks_everything() {
        let cfg = config(0, 0, 0);
        let state = record_opt_out(launched(100, NOW - 365 * MILLIS_PER_DAY));
        assert!(!should_prompt(&state, &cfg, NOW));

        let report = evaluate(&state, &cfg, NOW);
        assert!(!report.not_opted_out);
        assert!(report.launches_reached);
    }

    #[test]
    fn test_launch_gate_is_inclusive() {
        let cfg = config(3, 0, 0);
        assert!(!should_prompt(&launched(2, NOW), &cfg, NOW));
        assert!(should_prompt(&launched(3, NOW), &cfg, NOW));
    }

    #[test]
    fn test_monotonic_in_launch_count() {
        let cfg = config(4, 0, 0);
        let mut state = launched(4, NOW);
        for _ in 0..20 {
            assert!(should_prompt(&state, &cfg, NOW));
            state = record_launch(state, NOW);
        }
    }

    #[test]
    fn test_install_age_boundary() {
        let cfg = config(0, 2, 0);
        let state = launched(1, NOW);

        assert!(!should_prompt(&state, &cfg, NOW + 2 * MILLIS_PER_DAY - 1));
        assert!(should_prompt(&state, &cfg, NOW + 2 * MILLIS_PER_DAY));
    }

    #[test]
    fn test_remind_interval_boundary() {
        let cfg = config(0, 0, 1);
        let state = record_remind_later(launched(1, NOW), NOW);

        assert!(!should_prompt(&state, &cfg, NOW));
        assert!(!should_prompt(&state, &cfg, NOW + MILLIS_PER_DAY - 1));
        assert!(should_prompt(&state, &cfg, NOW + MILLIS_PER_DAY));
    }

    #[test]
    fn test_never_deferred_passes_remind_gate() {
        let cfg = config(0, 0, 30);
        let report = evaluate(&launched(1, NOW), &cfg, NOW);
        assert!(report.remind_interval_elapsed);
    }
}
