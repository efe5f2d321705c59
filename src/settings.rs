//! Loading the dialog settings file.
//!
//! The file has three tables: `[dialog]` (dialog options), `[strings]`
//! (localized texts referenced by resource key) and `[colors]` (hex colors
//! referenced by resource key).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use apprate::{build_configuration, DialogConfiguration, DialogOptions, ResourceTable};

/// Settings used when no file is given.
const DEFAULT_SETTINGS: &str = r##"
[dialog]
number_of_launches = 3
after_install_days = 0
remind_interval_days = 2
comment_threshold = 3
note_descriptions = ["Very bad", "Not good", "Quite ok", "Very good", "Excellent!"]
default_rating = 3
title = { resource = "rate.title" }
description = { resource = "rate.description" }
hint = { literal = "Tell us what went wrong" }
positive_button = { literal = "Submit" }
positive_review_button = { literal = "Rate in store" }
negative_button = { literal = "Never" }
neutral_button = { literal = "Later" }
cancelable = true

[dialog.colors]
star = "star"
title_text = "title"

[strings]
"rate.title" = "Enjoying the app?"
"rate.description" = "Please select some stars and give your feedback"

[colors]
star = "#fbbf24"
title = "#38bdf8"
"##;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    dialog: DialogOptions,
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

/// A validated configuration plus the resources its keys refer to.
#[derive(Debug)]
pub struct Settings {
    pub config: DialogConfiguration,
    pub resources: ResourceTable,
}

impl Settings {
    /// Loads settings from `path`, or the built-in defaults when None.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading dialog settings");
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {}", path.display()))?
            }
            None => DEFAULT_SETTINGS.to_string(),
        };
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content).context("Failed to parse settings")?;
        let config = build_configuration(&file.dialog).context("Invalid dialog settings")?;
        Ok(Self {
            config,
            resources: ResourceTable {
                strings: file.strings,
                colors: file.colors,
            },
        })
    }
}
