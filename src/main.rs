//! Terminal host for the "rate this app" prompt.
//!
//! Each run counts as one app launch: the usage counters are updated, and
//! when the prompt is due the rating dialog opens in the terminal.
//! Run with: apprate [--config <FILE>] [--data-dir <DIR>] [COMMAND]

mod app;
mod cli;
mod event;
mod host;
mod logging;
mod settings;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use apprate::constants::files;
use apprate::{AppRater, JsonFilePreferences, PromptOutcome};

use crate::cli::{Cli, Command};
use crate::host::TerminalHost;
use crate::settings::Settings;

/// Entry point for the application.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let _guard = logging::setup_logging(&data_dir.join("logs"), cli.log_level.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    let store = JsonFilePreferences::open(data_dir.join(files::PREFERENCES))
        .context("Failed to open usage preferences")?;
    let mut rater = AppRater::new(settings.config, store);
    let mut host = TerminalHost::new(settings.resources);

    let command = cli.selected_command();
    info!(?command, data_dir = %data_dir.display(), "Starting");

    match command {
        Command::Launch => {
            let usage = rater.monitor()?;
            host.set_usage(usage);
            let outcome = rater.show_rate_dialog_if_meets_conditions(&mut host)?;
            print_outcome(&outcome, rater.config().number_of_stars());
        }
        Command::Show => {
            host.set_usage(rater.usage()?);
            let outcome = rater.show(&mut host)?;
            print_outcome(&outcome, rater.config().number_of_stars());
        }
        Command::Status => {
            let usage = rater.usage()?;
            let report = rater.eligibility()?;
            println!("{}", ui::describe_usage(&usage));
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to format eligibility")?
            );
            println!(
                "Prompt due: {}",
                if report.is_eligible() { "yes" } else { "no" }
            );
        }
        Command::Reset => {
            rater.clear_settings()?;
            println!("Usage counters cleared.");
        }
        Command::Enable => {
            rater.clear_agree_show_dialog()?;
            println!("Rating prompt enabled again.");
        }
    }

    Ok(())
}

/// Returns the data directory from the command line or the platform default.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|dir| dir.join("apprate"))
            .context("Could not determine a data directory; pass --data-dir"),
    }
}

/// Prints what happened, so scripts can follow up (e.g. open a store page).
fn print_outcome(outcome: &PromptOutcome, number_of_stars: u8) {
    match outcome {
        PromptOutcome::NotEligible => println!("Rating prompt not due yet."),
        PromptOutcome::Submitted(result) => match &result.comment {
            Some(comment) if !comment.is_empty() => println!(
                "Rated {}/{} with feedback: {}",
                result.rating, number_of_stars, comment
            ),
            Some(_) => println!("Rated {}/{} without feedback.", result.rating, number_of_stars),
            None => println!(
                "Rated {}/{}. Thanks! Consider leaving a public review.",
                result.rating, number_of_stars
            ),
        },
        PromptOutcome::Declined => println!("We won't ask again."),
        PromptOutcome::Deferred => println!("We'll remind you later."),
        PromptOutcome::Dismissed => println!("Dialog closed."),
    }
}
