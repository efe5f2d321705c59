//! Rater service: binds a configuration, a preference store and a clock.
//!
//! This is what a host application holds for its lifetime. It records
//! launches, answers whether the prompt is due, hands the configuration to
//! a [`DialogHost`] and applies the bookkeeping for the outcome it returns.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::DialogConfiguration;
use crate::eligibility::{self, EligibilityReport};
use crate::store::{PreferenceStore, StorageError};
use crate::submission::{interpret_submission, DialogOutcome, RatingResult};
use crate::usage::{self, UsageState};

/// Errors raised by the rater service.
#[derive(Debug, Error)]
pub enum RaterError {
    #[error("usage storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("dialog host failed: {0}")]
    Host(#[from] anyhow::Error),
}

pub type RaterResult<T> = Result<T, RaterError>;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Presents the dialog and reports the user's choice.
pub trait DialogHost {
    fn present(&mut self, config: &DialogConfiguration) -> anyhow::Result<DialogOutcome>;
}

/// Result of one prompt interaction, after bookkeeping was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Conditions were not met; nothing was shown.
    NotEligible,
    /// The user confirmed a rating.
    Submitted(RatingResult),
    /// The user declined permanently.
    Declined,
    /// The user asked to be reminded later.
    Deferred,
    /// The dialog closed without a choice.
    Dismissed,
}

/// The rating prompt for one host process.
pub struct AppRater<S, C = SystemClock> {
    config: DialogConfiguration,
    store: S,
    clock: C,
}

impl<S: PreferenceStore> AppRater<S, SystemClock> {
    /// Creates a rater using wall-clock time.
    pub fn new(config: DialogConfiguration, store: S) -> Self {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: PreferenceStore, C: Clock> AppRater<S, C> {
    pub fn with_clock(config: DialogConfiguration, store: S, clock: C) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &DialogConfiguration {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store, consuming the rater.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Reads the persisted usage state.
    pub fn usage(&self) -> RaterResult<UsageState> {
        Ok(usage::load(&self.store)?)
    }

    /// Records an app launch. Call exactly once per launch.
    pub fn monitor(&mut self) -> RaterResult<UsageState> {
        let now = self.clock.now_millis();
        self.update(|state| usage::record_launch(state, now))
    }

    /// Evaluates every eligibility gate.
    pub fn eligibility(&self) -> RaterResult<EligibilityReport> {
        let state = self.usage()?;
        Ok(eligibility::evaluate(
            &state,
            &self.config,
            self.clock.now_millis(),
        ))
    }

    /// Whether the prompt should be shown now.
    pub fn should_show_rate_dialog(&self) -> RaterResult<bool> {
        Ok(self.eligibility()?.is_eligible())
    }

    /// Presents the dialog unconditionally and applies the outcome.
    pub fn show(&mut self, host: &mut dyn DialogHost) -> RaterResult<PromptOutcome> {
        let outcome = host.present(&self.config)?;
        self.handle_outcome(outcome)
    }

    /// Presents the dialog only when every condition holds.
    pub fn show_rate_dialog_if_meets_conditions(
        &mut self,
        host: &mut dyn DialogHost,
    ) -> RaterResult<PromptOutcome> {
        let report = self.eligibility()?;
        info!(?report, "Evaluated rating prompt eligibility");
        if !report.is_eligible() {
            return Ok(PromptOutcome::NotEligible);
        }
        self.show(host)
    }

    /// Applies the bookkeeping for a dialog outcome.
    pub fn handle_outcome(&mut self, outcome: DialogOutcome) -> RaterResult<PromptOutcome> {
        let result = match outcome {
            DialogOutcome::Positive { rating, comment } => {
                let stars = self.config.number_of_stars();
                if rating > stars {
                    warn!(rating, stars, "Dialog host reported a rating above the star count");
                }
                let rating = rating.min(stars);
                PromptOutcome::Submitted(interpret_submission(rating, comment, &self.config))
            }
            DialogOutcome::Negative => {
                self.opt_out()?;
                PromptOutcome::Declined
            }
            DialogOutcome::Neutral => {
                self.remind_later()?;
                PromptOutcome::Deferred
            }
            DialogOutcome::Dismissed => PromptOutcome::Dismissed,
        };
        info!(outcome = ?result, "Rating prompt finished");
        Ok(result)
    }

    /// The user declined; never prompt again until reset.
    pub fn opt_out(&mut self) -> RaterResult<UsageState> {
        self.update(usage::record_opt_out)
    }

    /// Starts the remind-later cool-down now.
    pub fn remind_later(&mut self) -> RaterResult<UsageState> {
        let now = self.clock.now_millis();
        self.update(|state| usage::record_remind_later(state, now))
    }

    /// Sets whether prompting is allowed at all, keeping the counters.
    pub fn set_agree_show_dialog(&mut self, agree: bool) -> RaterResult<UsageState> {
        if agree {
            self.update(usage::clear_opt_out)
        } else {
            self.opt_out()
        }
    }

    /// Re-enables prompting after an opt-out, keeping the counters.
    pub fn clear_agree_show_dialog(&mut self) -> RaterResult<UsageState> {
        self.set_agree_show_dialog(true)
    }

    /// Clears every persisted counter and flag.
    pub fn clear_settings(&mut self) -> RaterResult<UsageState> {
        self.store.clear()?;
        info!("Cleared rating prompt settings");
        Ok(usage::reset_usage())
    }

    fn update(
        &mut self,
        transition: impl FnOnce(UsageState) -> UsageState,
    ) -> RaterResult<UsageState> {
        let next = transition(usage::load(&self.store)?);
        usage::save(&mut self.store, &next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::constants::MILLIS_PER_DAY;
    use crate::store::{MemoryPreferences, Preference};

    const NOW: i64 = 1_700_000_000_000;

    #[derive(Clone)]
    struct FakeClock(Rc<Cell<i64>>);

    impl FakeClock {
        fn advance(&self, millis: i64) {
            self.0.set(self.0.get() + millis);
        }
    }

    impl Clock for FakeClock {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }

    struct ScriptedHost {
        outcome: DialogOutcome,
        presented: usize,
    }

    impl ScriptedHost {
        fn new(outcome: DialogOutcome) -> Self {
            Self {
                outcome,
                presented: 0,
            }
        }
    }

    impl DialogHost for ScriptedHost {
        fn present(&mut self, _config: &DialogConfiguration) -> anyhow::Result<DialogOutcome> {
            self.presented += 1;
            Ok(self.outcome.clone())
        }
    }

    struct FailingHost;

    impl DialogHost for FailingHost {
        fn present(&mut self, _config: &DialogConfiguration) -> anyhow::Result<DialogOutcome> {
            anyhow::bail!("terminal unavailable")
        }
    }

    /// Reads from memory and rejects every write.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryPreferences,
    }

    impl PreferenceStore for ReadOnlyStore {
        fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
            self.inner.get_bool(key)
        }

        fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError> {
            self.inner.get_i64(key)
        }

        fn put_all(&mut self, entries: &[(&str, Preference)]) -> Result<(), StorageError> {
            Err(StorageError::TypeMismatch {
                key: entries.last().map_or_else(String::new, |(key, _)| key.to_string()),
            })
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            self.inner.clear()
        }
    }

    fn test_config(launches: i32, install_days: i32, remind_days: i32) -> DialogConfiguration {
        DialogConfiguration::builder()
            .number_of_launches(launches)
            .unwrap()
            .after_install_days(install_days)
            .unwrap()
            .remind_interval(remind_days)
            .unwrap()
            .default_threshold(3)
            .unwrap()
            .build()
            .unwrap()
    }

    fn rater(
        launches: i32,
        install_days: i32,
        remind_days: i32,
    ) -> (AppRater<MemoryPreferences, FakeClock>, FakeClock) {
        let config = test_config(launches, install_days, remind_days);
        let clock = FakeClock(Rc::new(Cell::new(NOW)));
        (
            AppRater::with_clock(config, MemoryPreferences::new(), clock.clone()),
            clock,
        )
    }

    #[test]
    fn test_monitor_persists_launches() {
        let (mut rater, _) = rater(3, 0, 0);
        rater.monitor().unwrap();
        let state = rater.monitor().unwrap();

        assert_eq!(state.launch_count, 2);
        assert_eq!(state.install_timestamp, NOW);
        assert_eq!(rater.usage().unwrap(), state);
    }

    #[test]
    fn test_not_eligible_does_not_present() {
        let (mut rater, _) = rater(3, 0, 0);
        rater.monitor().unwrap();

        let mut host = ScriptedHost::new(DialogOutcome::Negative);
        let outcome = rater.show_rate_dialog_if_meets_conditions(&mut host).unwrap();

        assert_eq!(outcome, PromptOutcome::NotEligible);
        assert_eq!(host.presented, 0);
        assert!(!rater.usage().unwrap().user_opt_out);
    }

    #[test]
    fn test_negative_outcome_opts_out() {
        let (mut rater, _) = rater(1, 0, 0);
        rater.monitor().unwrap();

        let mut host = ScriptedHost::new(DialogOutcome::Negative);
        let outcome = rater.show_rate_dialog_if_meets_conditions(&mut host).unwrap();

        assert_eq!(outcome, PromptOutcome::Declined);
        assert!(rater.usage().unwrap().user_opt_out);
        assert!(!rater.should_show_rate_dialog().unwrap());
    }

    #[test]
    fn test_neutral_outcome_defers() {
        let (mut rater, clock) = rater(1, 0, 2);
        rater.monitor().unwrap();

        let mut host = ScriptedHost::new(DialogOutcome::Neutral);
        assert_eq!(
            rater.show_rate_dialog_if_meets_conditions(&mut host).unwrap(),
            PromptOutcome::Deferred
        );
        assert_eq!(rater.usage().unwrap().last_remind_timestamp, NOW);
        assert!(!rater.should_show_rate_dialog().unwrap());

        clock.advance(2 * MILLIS_PER_DAY);
        assert!(rater.should_show_rate_dialog().unwrap());
    }

    #[test]
    fn test_positive_outcome_interprets_comment() {
        let (mut rater, _) = rater(0, 0, 0);

        let mut host = ScriptedHost::new(DialogOutcome::Positive {
            rating: 2,
            comment: "crashes on start".to_string(),
        });
        let outcome = rater.show(&mut host).unwrap();
        assert_eq!(
            outcome,
            PromptOutcome::Submitted(RatingResult {
                rating: 2,
                comment: Some("crashes on start".to_string()),
            })
        );

        let mut host = ScriptedHost::new(DialogOutcome::Positive {
            rating: 5,
            comment: "ignored".to_string(),
        });
        let outcome = rater.show(&mut host).unwrap();
        assert_eq!(
            outcome,
            PromptOutcome::Submitted(RatingResult {
                rating: 5,
                comment: None,
            })
        );
        assert_eq!(rater.usage().unwrap(), UsageState::default());
    }

    #[test]
    fn test_dismissed_has_no_side_effect() {
        let (mut rater, _) = rater(0, 0, 0);
        rater.monitor().unwrap();
        let before = rater.usage().unwrap();

        assert_eq!(
            rater.handle_outcome(DialogOutcome::Dismissed).unwrap(),
            PromptOutcome::Dismissed
        );
        assert_eq!(rater.usage().unwrap(), before);
    }

    #[test]
    fn test_host_failure_propagates() {
        let (mut rater, _) = rater(0, 0, 0);
        let err = rater.show(&mut FailingHost).unwrap_err();
        assert!(matches!(err, RaterError::Host(_)));
    }

    #[test]
    fn test_clear_agree_show_dialog_keeps_counters() {
        let (mut rater, _) = rater(0, 0, 0);
        rater.monitor().unwrap();
        rater.opt_out().unwrap();

        let state = rater.clear_agree_show_dialog().unwrap();
        assert!(!state.user_opt_out);
        assert_eq!(state.launch_count, 1);
        assert!(rater.should_show_rate_dialog().unwrap());
    }

    #[test]
    fn test_clear_settings_resets_everything() {
        let (mut rater, _) = rater(0, 0, 0);
        rater.monitor().unwrap();
        rater.opt_out().unwrap();

        rater.clear_settings().unwrap();

        assert_eq!(rater.usage().unwrap(), UsageState::default());
        assert!(rater.store().is_empty());
    }

    #[test]
    fn test_rating_above_star_count_is_clamped() {
        let (mut rater, _) = rater(0, 0, 0);
        let stars = rater.config().number_of_stars();

        let outcome = rater
            .handle_outcome(DialogOutcome::Positive {
                rating: 9,
                comment: String::new(),
            })
            .unwrap();

        assert_eq!(
            outcome,
            PromptOutcome::Submitted(RatingResult {
                rating: stars,
                comment: None,
            })
        );
    }

    #[test]
    fn test_failed_save_leaves_usage_untouched() {
        let clock = FakeClock(Rc::new(Cell::new(NOW)));
        let mut rater = AppRater::with_clock(test_config(0, 0, 0), ReadOnlyStore::default(), clock);

        let err = rater.monitor().unwrap_err();

        assert!(matches!(err, RaterError::Storage(_)));
        assert_eq!(rater.usage().unwrap(), UsageState::default());
    }

    #[test]
    fn test_monitor_saves_one_batch() {
        let (mut rater, _) = rater(0, 0, 0);
        rater.monitor().unwrap();
        assert_eq!(rater.store().len(), 5);
    }
}
