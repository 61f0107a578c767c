//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/bub/config.toml
//! 3. Explicit config file (`--config` / `BUB_CONFIG`)
//! 4. Environment variables: BUB_*
//!
//! # Example Config
//!
//! ```toml
//! resources = ["sassy", "fluffy", "staging"]
//! deploy_targets = ["production"]
//! trigger_word = "bub"
//! bind = "0.0.0.0:3000"
//!
//! [slack]
//! token = "outgoing-webhook-token"
//! webhook_url = "https://hooks.slack.com/services/T000/B000/XXXX"
//!
//! [activity]
//! heroku_api_token = "..."
//! app_name_template = "acme-{resource}"
//! ```

mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;

pub use load::{global_config_path, load_config, load_toml_file};
pub use types::{ActivityConfig, Config, SlackConfig};
