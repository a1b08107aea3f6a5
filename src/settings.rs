//! User settings for the `refscope` application, persisted as TOML in the home directory.

use crate::constants::CFG_FILE_NAME;
use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, time::Duration};
use tracing::debug;

/// How descriptions and ref listings are printed.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable, optionally colored text.
    #[default]
    Text,
    /// The serialized model, as TOML.
    Toml,
}

/// User settings for `refscope`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Whether `git remote show` contacts the remote. When `false`, `-n` is passed.
    pub query_remotes: bool,
    /// How long a single `git remote show` may run, in seconds.
    pub timeout_secs: u64,
    /// The default [OutputFormat].
    pub format: OutputFormat,
    /// Whether text output is colored.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query_remotes: true,
            timeout_secs: 30,
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Settings {
    /// Returns the timeout applied to each `git` invocation.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Loads the settings from disk, writing the defaults first if the file does not exist.
    pub fn load_or_initialize() -> Result<Self> {
        let path = settings_path()?;

        if !path.exists() {
            let settings = Self::default();
            std::fs::write(&path, toml::to_string_pretty(&settings)?)?;
            debug!(path = %path.display(), "Initialized default settings");
            return Ok(settings);
        }

        let settings: Self = toml::from_str(&std::fs::read_to_string(&path)?)?;
        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }
}

/// Returns the path to the settings file, `$HOME/.refscope.toml`.
pub fn settings_path() -> Result<PathBuf> {
    let home = env::var_os("HOME").ok_or_else(|| anyhow!("HOME is not set."))?;
    Ok(PathBuf::from(home).join(CFG_FILE_NAME))
}
