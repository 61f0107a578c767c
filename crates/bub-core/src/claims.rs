//! Claim store
//!
//! Maps each registry resource to at most one lease. Taking a resource
//! overwrites whatever lease was there. Leases are never deleted: an expired
//! lease stays in storage and every read compares `expires_at` against the
//! caller's `now` (lazy expiry).

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Error, Registry, Result};

/// A time-bounded claim on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// Resource being claimed
    pub resource: String,
    /// Lease holder (chat user name)
    pub holder: String,
    /// When the lease stops being active
    pub expires_at: DateTime<Utc>,
}

impl Lease {
    /// Active iff the expiry is strictly after `now`
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Check whether `user` holds this lease and it is still active
    #[must_use]
    pub fn is_held_by(&self, user: &str, now: DateTime<Utc>) -> bool {
        self.holder == user && self.is_active(now)
    }
}

/// Activity predicate over an optional lease
#[must_use]
pub fn is_active(lease: Option<&Lease>, now: DateTime<Utc>) -> bool {
    lease.is_some_and(|l| l.is_active(now))
}

/// Point-in-time view of the store, total over the registry and in
/// registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsInfo {
    entries: Vec<(String, Option<Lease>)>,
}

impl ClaimsInfo {
    /// Lease recorded for `resource`, active or not
    #[must_use]
    pub fn get(&self, resource: &str) -> Option<&Lease> {
        self.entries
            .iter()
            .find(|(name, _)| name == resource)
            .and_then(|(_, lease)| lease.as_ref())
    }

    /// Entries in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Lease>)> {
        self.entries
            .iter()
            .map(|(name, lease)| (name.as_str(), lease.as_ref()))
    }

    /// First resource in registry order with no active lease
    #[must_use]
    pub fn first_available(&self, now: DateTime<Utc>) -> Option<&str> {
        self.iter()
            .find(|(_, lease)| !is_active(*lease, now))
            .map(|(name, _)| name)
    }
}

/// In-memory lease store shared between request handlers
#[derive(Debug, Clone)]
pub struct Claims {
    registry: Registry,
    leases: Arc<Mutex<HashMap<String, Lease>>>,
}

impl Claims {
    /// Create an empty store over `registry`
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            leases: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of every registry resource and its recorded lease
    pub async fn info(&self) -> ClaimsInfo {
        let leases = self.leases.lock().await;
        ClaimsInfo {
            entries: self
                .registry
                .iter()
                .map(|name| (name.to_string(), leases.get(name).cloned()))
                .collect(),
        }
    }

    /// Lease recorded for `resource`, active or not
    pub async fn lease(&self, resource: &str) -> Option<Lease> {
        self.leases.lock().await.get(resource).cloned()
    }

    /// Install or overwrite the lease on a named resource.
    ///
    /// Returns `UnknownResource` if `resource` is not in the registry.
    pub async fn take(
        &self,
        resource: &str,
        holder: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Lease> {
        if !self.registry.contains(resource) {
            return Err(Error::UnknownResource(resource.to_string()));
        }

        let lease = Lease {
            resource: resource.to_string(),
            holder: holder.to_string(),
            expires_at,
        };

        let previous = self
            .leases
            .lock()
            .await
            .insert(resource.to_string(), lease.clone());

        if let Some(previous) = previous {
            debug!(resource, previous_holder = %previous.holder, "Overwriting lease");
        }
        info!(resource, holder, %expires_at, "Lease taken");
        Ok(lease)
    }

    /// Lease the first resource (registry order) with no active lease.
    ///
    /// The scan and the write happen under one lock acquisition, so two
    /// concurrent callers never pick the same free resource. Returns
    /// `NoResourcesAvailable` without writing anything when every resource
    /// is actively leased.
    pub async fn take_first_available(
        &self,
        holder: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Lease> {
        let mut leases = self.leases.lock().await;

        let resource = self
            .registry
            .iter()
            .find(|name| !is_active(leases.get(*name), now))
            .ok_or(Error::NoResourcesAvailable)?;

        let lease = Lease {
            resource: resource.to_string(),
            holder: holder.to_string(),
            expires_at,
        };
        leases.insert(resource.to_string(), lease.clone());
        drop(leases);

        info!(resource = %lease.resource, holder, %expires_at, "Lease taken (first available)");
        Ok(lease)
    }
}
