//! Shared application state handed to every command handler

use std::sync::Arc;

use bub_core::{
    ActivitySource, Claims, Clock, Config, Deploys, HerokuActivity, Result, SystemClock,
};
use chrono::{DateTime, Utc};

/// Stores, configuration and collaborators for one running bot
#[derive(Clone)]
pub struct App {
    config: Arc<Config>,
    pub claims: Claims,
    pub deploys: Deploys,
    clock: Arc<dyn Clock>,
    activity: Option<Arc<dyn ActivitySource>>,
}

impl App {
    /// Build state from a validated configuration.
    ///
    /// Uses the system clock; last-activity lookup is enabled when a Heroku
    /// API token is configured.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let registry = config.registry()?;

        let activity = config.activity.heroku_api_token.as_ref().map(|token| {
            Arc::new(HerokuActivity::new(
                token.clone(),
                config.activity.app_name_template.clone(),
            )) as Arc<dyn ActivitySource>
        });

        Ok(Self {
            claims: Claims::new(registry),
            deploys: Deploys::new(),
            clock: Arc::new(SystemClock),
            activity,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_activity(mut self, activity: Arc<dyn ActivitySource>) -> Self {
        self.activity = Some(activity);
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current instant; read once per command
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn activity(&self) -> Option<&dyn ActivitySource> {
        self.activity.as_deref()
    }

    /// Text after the leading trigger word (`bub`, `Bub:`).
    ///
    /// `None` when the message does not start with the trigger word, which
    /// marks it as ordinary chat.
    #[must_use]
    pub fn strip_trigger<'a>(&self, text: &'a str) -> Option<&'a str> {
        let text = text.trim_start();
        let word_end = text.find(char::is_whitespace).unwrap_or(text.len());
        let (first, rest) = text.split_at(word_end);
        let first = first.strip_suffix(':').unwrap_or(first);

        first
            .eq_ignore_ascii_case(&self.config.trigger_word)
            .then(|| rest.trim_start())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("claims", &self.claims)
            .field("deploys", &self.deploys)
            .field("activity", &self.activity.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        match App::from_config(Config::default()) {
            Ok(app) => app,
            Err(e) => panic!("app: {e}"),
        }
    }

    #[test]
    fn test_strip_trigger() {
        let app = app();
        assert_eq!(app.strip_trigger("bub status"), Some("status"));
        assert_eq!(app.strip_trigger("Bub: take sassy"), Some("take sassy"));
        assert_eq!(app.strip_trigger("  BUB   deploy staging"), Some("deploy staging"));
        assert_eq!(app.strip_trigger("bub"), Some(""));
    }

    #[test]
    fn test_untriggered_text_is_chat() {
        let app = app();
        assert_eq!(app.strip_trigger("status"), None);
        assert_eq!(app.strip_trigger("take a look at this"), None);
        assert_eq!(app.strip_trigger("bubble tea"), None);
    }

    #[test]
    fn test_activity_disabled_without_token() {
        assert!(app().activity().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            resources: Vec::new(),
            ..Config::default()
        };
        assert!(App::from_config(config).is_err());
    }
}
