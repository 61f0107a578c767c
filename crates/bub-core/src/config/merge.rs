//! Configuration merging logic
//!
//! Later configs override earlier ones (defaults → global → explicit → env).
//! A field left at its default in the overriding config keeps the earlier
//! value. Lists are replaced, not appended.

use super::types::{
    ActivityConfig, Config, SlackConfig, DEFAULT_APP_NAME_TEMPLATE, DEFAULT_BIND,
    DEFAULT_RESOURCES, DEFAULT_TRIGGER_WORD,
};

impl Config {
    /// Merge another config into this one (other takes precedence)
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            resources: if other.resources == DEFAULT_RESOURCES {
                self.resources
            } else {
                other.resources
            },
            deploy_targets: if other.deploy_targets.is_empty() {
                self.deploy_targets
            } else {
                other.deploy_targets
            },
            trigger_word: if other.trigger_word == DEFAULT_TRIGGER_WORD {
                self.trigger_word
            } else {
                other.trigger_word
            },
            bind: if other.bind == DEFAULT_BIND {
                self.bind
            } else {
                other.bind
            },
            log_filter: other.log_filter.or(self.log_filter),
            completion_token: other.completion_token.or(self.completion_token),
            slack: self.slack.merge(other.slack),
            activity: self.activity.merge(other.activity),
        }
    }
}

impl SlackConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            token: other.token.or(self.token),
            webhook_url: other.webhook_url.or(self.webhook_url),
        }
    }
}

impl ActivityConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            heroku_api_token: other.heroku_api_token.or(self.heroku_api_token),
            app_name_template: if other.app_name_template == DEFAULT_APP_NAME_TEMPLATE {
                self.app_name_template
            } else {
                other.app_name_template
            },
        }
    }
}
