//! Error types for bub-core

use thiserror::Error;

/// Core error type for bub operations
///
/// Everything except `InvalidConfig`, `Io` and `Parse` is a user-facing
/// outcome of a chat command and is reported as a single reply line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Magnitude or unit tokens could not be read as a duration
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Every registry resource holds an active lease
    #[error("No resources available")]
    NoResourcesAvailable,

    /// Named resource is not part of the registry
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Deploy marker already held for the resource
    #[error("{holder} is already deploying to {resource}")]
    DeployConflict { resource: String, holder: String },

    /// Deploy attempted without an active lease on the resource
    #[error("{user} does not hold an active lease on {resource}")]
    PreconditionFailed { resource: String, user: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO errors while loading configuration
    #[error("IO error: {0}")]
    Io(String),

    /// Parse errors for configuration or collaborator payloads
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Whether this error is reported back to the chat user rather than
    /// failing the process.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_) | Self::Io(_) | Self::Parse(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(format!("Failed to parse config: {err}"))
    }
}

/// Result type alias for bub-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_conflict_display() {
        let err = Error::DeployConflict {
            resource: "staging".to_string(),
            holder: "kevin".to_string(),
        };
        assert_eq!(err.to_string(), "kevin is already deploying to staging");
    }

    #[test]
    fn test_user_facing_split() {
        assert!(Error::NoResourcesAvailable.is_user_facing());
        assert!(Error::InvalidDuration("x".into()).is_user_facing());
        assert!(!Error::InvalidConfig("x".into()).is_user_facing());
        assert!(!Error::Io("x".into()).is_user_facing());
    }

    #[test]
    fn test_toml_error_converts_to_parse() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("resources = [");
        let err = parsed.map_err(Error::from).err();
        assert!(matches!(err, Some(Error::Parse(_))));
    }
}
