//! Configurable "rate this app" prompt.
//!
//! The crate decides when to ask a user for a rating and interprets what
//! they answer:
//!
//! - [`config`]: validated, immutable dialog configuration
//! - [`eligibility`]: the pure "should we prompt now" decision
//! - [`usage`]: persisted launch/install/remind counters and their updates
//! - [`submission`]: dialog outcomes and comment gating
//! - [`rater`]: a service tying the above to a store, a clock and a host
//!
//! Rendering is left to a [`rater::DialogHost`]; the `apprate` binary ships
//! a terminal one.

pub mod config;
pub mod constants;
pub mod eligibility;
pub mod rater;
pub mod store;
pub mod submission;
pub mod text;
pub mod usage;
pub mod validation;

pub use config::{
    build_configuration, DialogConfiguration, DialogConfigurationBuilder, DialogOptions,
};
pub use eligibility::{should_prompt, EligibilityReport};
pub use rater::{AppRater, Clock, DialogHost, PromptOutcome, RaterError, SystemClock};
pub use store::{
    JsonFilePreferences, MemoryPreferences, Preference, PreferenceStore, StorageError,
};
pub use submission::{interpret_submission, DialogOutcome, RatingResult};
pub use text::{ResourceKey, ResourceTable, StringValue, TextResolver};
pub use usage::{record_launch, record_opt_out, record_remind_later, reset_usage, UsageState};
pub use validation::ValidationError;
