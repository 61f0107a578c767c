//! Configuration validation

use super::types::Config;
use crate::{registry::validate_name, Error, Registry, Result};

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - The resource registry is invalid (see [`Registry::new`])
    /// - A deploy target is invalid or also listed as a resource
    /// - The trigger word or bind address is empty
    pub fn validate(&self) -> Result<()> {
        self.registry()?;

        for target in &self.deploy_targets {
            validate_name(target)?;
            if self.resources.contains(target) {
                return Err(Error::InvalidConfig(format!(
                    "'{target}' is both a resource and a deploy target"
                )));
            }
        }

        if self.trigger_word.trim().is_empty() {
            return Err(Error::InvalidConfig("trigger_word cannot be empty".into()));
        }
        if self.bind.trim().is_empty() {
            return Err(Error::InvalidConfig("bind cannot be empty".into()));
        }

        Ok(())
    }

    /// Build the resource registry from `resources`
    pub fn registry(&self) -> Result<Registry> {
        Registry::new(self.resources.iter().cloned())
    }

    /// Whether `name` is a deploy-only target
    #[must_use]
    pub fn is_deploy_target(&self, name: &str) -> bool {
        self.deploy_targets.iter().any(|t| t == name)
    }
}
