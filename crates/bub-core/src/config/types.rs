//! Configuration structure definitions and defaults

use serde::{Deserialize, Serialize};

pub(super) const DEFAULT_RESOURCES: [&str; 3] = ["sassy", "fluffy", "staging"];
pub(super) const DEFAULT_TRIGGER_WORD: &str = "bub";
pub(super) const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub(super) const DEFAULT_APP_NAME_TEMPLATE: &str = "{resource}";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Claimable resources, in allocation order
    pub resources: Vec<String>,
    /// Deploy-only targets that need no lease (e.g. production)
    pub deploy_targets: Vec<String>,
    /// Word that prefixes chat commands
    pub trigger_word: String,
    /// HTTP listen address
    pub bind: String,
    /// Tracing filter directive (e.g. `bub=debug`)
    pub log_filter: Option<String>,
    /// Bearer token required on deploy completion calls
    pub completion_token: Option<String>,
    pub slack: SlackConfig,
    pub activity: ActivityConfig,
}

/// Slack transport settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Token Slack sends with each outgoing webhook
    pub token: Option<String>,
    /// Incoming webhook used to post replies
    pub webhook_url: Option<String>,
}

/// Last-activity lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Heroku Platform API token; lookup is disabled when unset
    pub heroku_api_token: Option<String>,
    /// Heroku app name for a resource, `{resource}` is substituted
    pub app_name_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: DEFAULT_RESOURCES.iter().map(ToString::to_string).collect(),
            deploy_targets: Vec::new(),
            trigger_word: DEFAULT_TRIGGER_WORD.to_string(),
            bind: DEFAULT_BIND.to_string(),
            log_filter: None,
            completion_token: None,
            slack: SlackConfig::default(),
            activity: ActivityConfig::default(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            heroku_api_token: None,
            app_name_template: DEFAULT_APP_NAME_TEMPLATE.to_string(),
        }
    }
}
