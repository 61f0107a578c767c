//! `take` argument resolution
//!
//! Classifies the tokens after `take` into an optional resource name and an
//! optional duration:
//!
//! | tokens                 | resource            | duration        |
//! |------------------------|---------------------|-----------------|
//! | (none)                 | first available     | one hour        |
//! | `sassy`                | `sassy`             | one hour        |
//! | `3 days` / `3days`     | first available     | three days      |
//! | `sassy 3 days`         | `sassy`             | three days      |
//!
//! Registry names never read as durations (enforced by [`Registry::new`]),
//! so a leading registry name is never fed to the duration parser and a
//! duration expression is never matched against the registry.

use chrono::{DateTime, Utc};

use crate::{
    duration::{parse_duration, parse_expiry},
    Claims, Error, Lease, Registry, Result,
};

/// Which resource a `take` should lease
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeTarget {
    /// An explicitly named registry resource
    Named(String),
    /// The first resource in registry order without an active lease
    FirstAvailable,
}

/// Classified `take` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeArgs {
    pub target: TakeTarget,
    pub expires_at: DateTime<Utc>,
}

impl TakeArgs {
    /// Classify raw tokens against the registry.
    ///
    /// # Errors
    ///
    /// - `InvalidDuration` if the duration tokens are malformed, including a
    ///   lone token that is neither a resource nor a complete duration
    /// - `UnknownResource` if a leading name is followed by a valid duration
    ///   but is not in the registry
    pub fn classify(tokens: &[&str], registry: &Registry, now: DateTime<Utc>) -> Result<Self> {
        match tokens {
            [] => Ok(Self {
                target: TakeTarget::FirstAvailable,
                expires_at: parse_expiry(&[], now)?,
            }),
            [first, rest @ ..] if registry.contains(first) => Ok(Self {
                target: TakeTarget::Named((*first).to_string()),
                expires_at: parse_expiry(rest, now)?,
            }),
            [first, rest @ ..] => match parse_expiry(tokens, now) {
                Ok(expires_at) => Ok(Self {
                    target: TakeTarget::FirstAvailable,
                    expires_at,
                }),
                Err(_) if !rest.is_empty() && parse_duration(rest).is_ok() => {
                    Err(Error::UnknownResource((*first).to_string()))
                }
                Err(e) => Err(e),
            },
        }
    }
}

/// Resolve `take` tokens and install the resulting lease.
///
/// Classification happens first, so a malformed request never touches the
/// store. First-available selection and the write are atomic with respect
/// to other `take` calls on the same store.
pub async fn resolve_take(
    tokens: &[&str],
    claims: &Claims,
    holder: &str,
    now: DateTime<Utc>,
) -> Result<Lease> {
    let args = TakeArgs::classify(tokens, claims.registry(), now)?;
    match args.target {
        TakeTarget::Named(resource) => claims.take(&resource, holder, args.expires_at).await,
        TakeTarget::FirstAvailable => {
            claims
                .take_first_available(holder, args.expires_at, now)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn registry() -> Registry {
        match Registry::new(["sassy", "fluffy", "staging"]) {
            Ok(r) => r,
            Err(e) => panic!("registry: {e}"),
        }
    }

    #[test]
    fn test_no_tokens() {
        let now = Utc::now();
        let args = TakeArgs::classify(&[], &registry(), now);
        assert_eq!(
            args,
            Ok(TakeArgs {
                target: TakeTarget::FirstAvailable,
                expires_at: now + Duration::hours(1),
            })
        );
    }

    #[test]
    fn test_resource_only() {
        let now = Utc::now();
        let args = TakeArgs::classify(&["sassy"], &registry(), now);
        assert_eq!(
            args,
            Ok(TakeArgs {
                target: TakeTarget::Named("sassy".into()),
                expires_at: now + Duration::hours(1),
            })
        );
    }

    #[test]
    fn test_duration_only() {
        let now = Utc::now();
        let expected = Ok(TakeArgs {
            target: TakeTarget::FirstAvailable,
            expires_at: now + Duration::days(3),
        });
        assert_eq!(TakeArgs::classify(&["3", "days"], &registry(), now), expected);
        assert_eq!(TakeArgs::classify(&["3days"], &registry(), now), expected);
    }

    #[test]
    fn test_resource_and_duration() {
        let now = Utc::now();
        let args = TakeArgs::classify(&["sassy", "3", "days"], &registry(), now);
        assert_eq!(
            args,
            Ok(TakeArgs {
                target: TakeTarget::Named("sassy".into()),
                expires_at: now + Duration::days(3),
            })
        );
        let compact = TakeArgs::classify(&["fluffy", "30minutes"], &registry(), now);
        assert_eq!(
            compact.map(|a| a.expires_at),
            Ok(now + Duration::minutes(30))
        );
    }

    #[test]
    fn test_lone_unknown_token_is_invalid_duration() {
        let result = TakeArgs::classify(&["sasy"], &registry(), Utc::now());
        assert!(matches!(result, Err(Error::InvalidDuration(_))));
    }

    #[test]
    fn test_unknown_name_with_duration_is_unknown_resource() {
        let result = TakeArgs::classify(&["production", "3", "days"], &registry(), Utc::now());
        assert_eq!(result, Err(Error::UnknownResource("production".into())));
    }

    #[test]
    fn test_resource_with_bad_duration() {
        let result = TakeArgs::classify(&["sassy", "three", "days"], &registry(), Utc::now());
        assert!(matches!(result, Err(Error::InvalidDuration(_))));
    }

    #[tokio::test]
    async fn test_resolve_take_named_and_first_available() -> Result<()> {
        let claims = Claims::new(registry());
        let now = Utc::now();

        let lease = resolve_take(&["staging"], &claims, "kevin", now).await?;
        assert_eq!(lease.resource, "staging");

        let lease = resolve_take(&[], &claims, "ann", now).await?;
        assert_eq!(lease.resource, "sassy");
        assert_eq!(lease.expires_at, now + Duration::hours(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_resolution_leaves_store_untouched() {
        let claims = Claims::new(registry());
        let before = claims.info().await;
        let result = resolve_take(&["sassy", "3", "weeks"], &claims, "kevin", Utc::now()).await;
        assert!(result.is_err());
        assert_eq!(claims.info().await, before);
    }
}
