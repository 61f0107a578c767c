//! Configuration loading from files and environment

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::{Error, Result};

/// Load configuration from all sources with hierarchy.
///
/// `explicit` is a file the caller named; unlike the global file it must
/// exist.
///
/// # Errors
///
/// Returns error if:
/// - The explicit config file is missing or unreadable
/// - A config file is malformed TOML
/// - An environment override is malformed
/// - The merged config fails validation
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = Config::default();

    let config = match global_config_path() {
        Some(path) if path.is_file() => config.merge(load_toml_file(&path)?),
        _ => config,
    };

    let config = match explicit {
        Some(path) => config.merge(load_toml_file(path)?),
        None => config,
    };

    let config = config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bub")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Load a TOML file into a Config
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(Error::Io(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::Parse(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

impl Config {
    /// Apply `BUB_*` overrides read through `lookup`
    ///
    /// # Errors
    ///
    /// Returns error if an override value is empty where a value is required
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BUB_BIND") {
            self.bind = value;
        }

        if let Some(value) = lookup("BUB_RESOURCES") {
            let resources: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect();
            if resources.is_empty() {
                return Err(Error::InvalidConfig(
                    "BUB_RESOURCES cannot be empty - unset the variable or list resources".into(),
                ));
            }
            self.resources = resources;
        }

        if let Some(value) = lookup("BUB_SLACK_TOKEN") {
            self.slack.token = Some(value);
        }

        if let Some(value) = lookup("BUB_SLACK_WEBHOOK_URL") {
            self.slack.webhook_url = Some(value);
        }

        if let Some(value) = lookup("BUB_HEROKU_API_TOKEN") {
            self.activity.heroku_api_token = Some(value);
        }

        if let Some(value) = lookup("BUB_COMPLETION_TOKEN") {
            self.completion_token = Some(value);
        }

        if let Some(value) = lookup("BUB_LOG") {
            self.log_filter = Some(value);
        }

        Ok(self)
    }
}
