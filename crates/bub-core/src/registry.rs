//! Resource registry
//!
//! The fixed, ordered list of claimable resources. Built once from
//! configuration and passed explicitly to whatever needs it.

use std::sync::Arc;

use itertools::Itertools;

use crate::{duration::is_duration_token, Error, Result};

/// Immutable ordered set of resource names.
///
/// Cloning is cheap; all clones share the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    names: Arc<[String]>,
}

impl Registry {
    /// Build a registry, validating every name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - The list is empty
    /// - A name is empty or contains whitespace
    /// - A name appears twice
    /// - A name reads as a duration token (e.g. `3`, `hours`, `2days`)
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(Error::InvalidConfig(
                "resource registry cannot be empty".into(),
            ));
        }
        names.iter().try_for_each(|name| validate_name(name))?;
        if let Some(dup) = names.iter().duplicates().next() {
            return Err(Error::InvalidConfig(format!(
                "resource '{dup}' is listed more than once"
            )));
        }

        Ok(Self {
            names: names.into(),
        })
    }

    /// Whether `name` exactly matches a registry entry
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in registry order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Check a single resource or deploy target name.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidConfig("resource name cannot be empty".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidConfig(format!(
            "resource name '{name}' cannot contain whitespace"
        )));
    }
    if is_duration_token(name) {
        return Err(Error::InvalidConfig(format!(
            "resource name '{name}' would be read as a duration"
        )));
    }
    Ok(())
}
