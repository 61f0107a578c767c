//! Deploy lock
//!
//! At most one in-progress deploy per resource. Unlike leases, a marker is
//! never overwritten: acquiring is a compare-and-set, and the marker stays
//! until the deploy pipeline reports completion.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Error, Result};

/// An in-progress deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployMarker {
    /// Resource being deployed to
    pub resource: String,
    /// User who started the deploy
    pub holder: String,
    /// When the deploy started
    pub started_at: DateTime<Utc>,
}

/// In-memory deploy markers shared between request handlers
#[derive(Debug, Clone, Default)]
pub struct Deploys {
    markers: Arc<Mutex<BTreeMap<String, DeployMarker>>>,
}

impl Deploys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All active markers, ordered by resource name
    pub async fn info(&self) -> Vec<DeployMarker> {
        self.markers.lock().await.values().cloned().collect()
    }

    /// Holder of the marker on `resource`, if any
    pub async fn deploying_user(&self, resource: &str) -> Option<String> {
        self.markers
            .lock()
            .await
            .get(resource)
            .map(|m| m.holder.clone())
    }

    /// Try to start a deploy.
    ///
    /// Returns `true` and installs the marker if none existed. Returns
    /// `false` and leaves the existing marker untouched otherwise, whoever
    /// holds it.
    pub async fn deploy(&self, resource: &str, holder: &str, now: DateTime<Utc>) -> bool {
        self.try_deploy(resource, holder, now).await.is_ok()
    }

    /// Like [`Deploys::deploy`], but reports the current holder on refusal.
    ///
    /// The check and the insert happen under one lock acquisition.
    pub async fn try_deploy(
        &self,
        resource: &str,
        holder: &str,
        now: DateTime<Utc>,
    ) -> Result<DeployMarker> {
        let mut markers = self.markers.lock().await;

        if let Some(existing) = markers.get(resource) {
            debug!(resource, holder, current = %existing.holder, "Deploy refused");
            return Err(Error::DeployConflict {
                resource: resource.to_string(),
                holder: existing.holder.clone(),
            });
        }

        let marker = DeployMarker {
            resource: resource.to_string(),
            holder: holder.to_string(),
            started_at: now,
        };
        markers.insert(resource.to_string(), marker.clone());
        drop(markers);

        info!(resource, holder, "Deploy started");
        Ok(marker)
    }

    /// Clear the marker for `resource`.
    ///
    /// Returns the cleared marker; a no-op returning `None` if there was none.
    pub async fn complete(&self, resource: &str) -> Option<DeployMarker> {
        let cleared = self.markers.lock().await.remove(resource);
        match &cleared {
            Some(marker) => info!(resource, holder = %marker.holder, "Deploy completed"),
            None => debug!(resource, "Completion for resource with no active deploy"),
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_deploy_succeeds() {
        let deploys = Deploys::new();
        assert!(deploys.deploy("staging", "kevin", Utc::now()).await);
        assert_eq!(deploys.deploying_user("staging").await.as_deref(), Some("kevin"));
    }

    #[tokio::test]
    async fn test_second_deploy_does_not_displace_first() {
        let deploys = Deploys::new();
        let now = Utc::now();
        assert!(deploys.deploy("staging", "kevin", now).await);
        assert!(!deploys.deploy("staging", "ann", now).await);
        assert!(!deploys.deploy("staging", "kevin", now).await);
        assert_eq!(deploys.deploying_user("staging").await.as_deref(), Some("kevin"));
    }

    #[tokio::test]
    async fn test_try_deploy_reports_holder() {
        let deploys = Deploys::new();
        let now = Utc::now();
        let marker = deploys.try_deploy("staging", "kevin", now).await;
        assert_eq!(marker.map(|m| m.started_at), Ok(now));

        let refused = deploys.try_deploy("staging", "ann", now).await;
        assert_eq!(
            refused,
            Err(Error::DeployConflict {
                resource: "staging".into(),
                holder: "kevin".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_complete_releases_and_is_idempotent() {
        let deploys = Deploys::new();
        let now = Utc::now();
        deploys.deploy("staging", "kevin", now).await;

        assert!(deploys.complete("staging").await.is_some());
        assert!(deploys.complete("staging").await.is_none());
        assert!(deploys.deploying_user("staging").await.is_none());
        assert!(deploys.deploy("staging", "ann", now).await);
    }

    #[tokio::test]
    async fn test_info_lists_markers_in_stable_order() {
        let deploys = Deploys::new();
        let now = Utc::now();
        deploys.deploy("staging", "kevin", now).await;
        deploys.deploy("production", "ann", now).await;

        let info = deploys.info().await;
        let pairs: Vec<_> = info
            .iter()
            .map(|m| (m.resource.as_str(), m.holder.as_str()))
            .collect();
        assert_eq!(pairs, vec![("production", "ann"), ("staging", "kevin")]);
    }
}
