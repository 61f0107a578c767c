//! Last-activity lookup for status replies
//!
//! Status lines can mention when a resource was last active. The lookup is
//! best-effort: every failure degrades to "unknown" and is only logged.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

/// Reports when a resource was last active
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Last activity instant, or `None` when unknown
    async fn last_activity(&self, resource: &str) -> Option<DateTime<Utc>>;
}

/// Source that never knows anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivity;

#[async_trait]
impl ActivitySource for NoActivity {
    async fn last_activity(&self, _resource: &str) -> Option<DateTime<Utc>> {
        None
    }
}

const HEROKU_API_BASE: &str = "https://api.heroku.com";
const HEROKU_ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Upper bound on one release lookup; a status reply waits on it
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Deserialize)]
struct Release {
    created_at: DateTime<Utc>,
}

/// Heroku Platform API source: the newest release of the resource's app
#[derive(Debug, Clone)]
pub struct HerokuActivity {
    client: Client,
    token: String,
    base_url: String,
    app_name_template: String,
}

impl HerokuActivity {
    /// `app_name_template` maps a resource to an app name; `{resource}` is
    /// replaced with the resource name.
    #[must_use]
    pub fn new(token: impl Into<String>, app_name_template: impl Into<String>) -> Self {
        Self {
            client: client_with_timeout(DEFAULT_LOOKUP_TIMEOUT),
            token: token.into(),
            base_url: HEROKU_API_BASE.to_string(),
            app_name_template: app_name_template.into(),
        }
    }

    /// Point the client at a different API host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Give up on a lookup after `timeout` instead of the default
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = client_with_timeout(timeout);
        self
    }

    /// Heroku app backing `resource`
    #[must_use]
    pub fn app_name(&self, resource: &str) -> String {
        self.app_name_template.replace("{resource}", resource)
    }

    async fn latest_release(&self, resource: &str) -> Result<Option<DateTime<Utc>>> {
        let url = format!("{}/apps/{}/releases", self.base_url, self.app_name(resource));

        let releases: Vec<Release> = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, HEROKU_ACCEPT)
            .header(reqwest::header::RANGE, "version ..; order=desc, max=1")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Io(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(releases.into_iter().map(|r| r.created_at).max())
    }
}

#[async_trait]
impl ActivitySource for HerokuActivity {
    async fn last_activity(&self, resource: &str) -> Option<DateTime<Utc>> {
        match self.latest_release(resource).await {
            Ok(at) => at,
            Err(e) => {
                warn!(resource, error = %e, "Failed to fetch last activity");
                None
            }
        }
    }
}
