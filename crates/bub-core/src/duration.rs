//! Duration parsing for `take` arguments
//!
//! Accepted forms:
//! - nothing: the default lease of one hour
//! - `<magnitude> <unit>` as two tokens, e.g. `3 days`
//! - `<magnitude><unit>` as one token, e.g. `45minutes`
//!
//! Units are minute, hour and day in singular or plural spelling,
//! case-insensitive. The magnitude must be a positive integer.

use chrono::{DateTime, Duration, Utc};

use crate::{Error, Result};

/// Lease length used when no duration is given.
#[must_use]
pub fn default_duration() -> Duration {
    Duration::hours(1)
}

/// Duration unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minute,
    Hour,
    Day,
}

impl Unit {
    /// Parse a unit word (singular or plural)
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "minute" | "minutes" => Some(Self::Minute),
            "hour" | "hours" => Some(Self::Hour),
            "day" | "days" => Some(Self::Day),
            _ => None,
        }
    }

    fn span(self, magnitude: i64) -> Option<Duration> {
        match self {
            Self::Minute => Duration::try_minutes(magnitude),
            Self::Hour => Duration::try_hours(magnitude),
            Self::Day => Duration::try_days(magnitude),
        }
    }
}

/// Parse a token sequence into a duration.
pub fn parse_duration(tokens: &[&str]) -> Result<Duration> {
    match tokens {
        [] => Ok(default_duration()),
        [compact] => {
            let split = compact
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| invalid(tokens, "missing unit"))?;
            let (magnitude, unit) = compact.split_at(split);
            build(tokens, magnitude, unit)
        }
        [magnitude, unit] => build(tokens, magnitude, unit),
        _ => Err(invalid(tokens, "expected a magnitude and a unit")),
    }
}

/// Parse a token sequence into an expiry instant relative to `now`.
pub fn parse_expiry(tokens: &[&str], now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let span = parse_duration(tokens)?;
    now.checked_add_signed(span)
        .ok_or_else(|| invalid(tokens, "duration is too large"))
}

/// Whether a single token could start or form a duration expression.
///
/// Registry names must not satisfy this, otherwise a lone token would be
/// ambiguous between a resource and a duration.
#[must_use]
pub fn is_duration_token(token: &str) -> bool {
    is_magnitude(token) || Unit::parse(token).is_some() || parse_duration(&[token]).is_ok()
}

fn build(tokens: &[&str], magnitude: &str, unit: &str) -> Result<Duration> {
    let magnitude = parse_magnitude(tokens, magnitude)?;
    let unit = Unit::parse(unit).ok_or_else(|| invalid(tokens, "unknown unit"))?;
    unit.span(magnitude)
        .ok_or_else(|| invalid(tokens, "duration is too large"))
}

fn parse_magnitude(tokens: &[&str], magnitude: &str) -> Result<i64> {
    if !is_magnitude(magnitude) {
        return Err(invalid(tokens, "magnitude must be a positive whole number"));
    }
    match magnitude.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(invalid(tokens, "magnitude must be positive")),
        Err(_) => Err(invalid(tokens, "magnitude is too large")),
    }
}

fn is_magnitude(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn invalid(tokens: &[&str], reason: &str) -> Error {
    Error::InvalidDuration(format!("'{}': {reason}", tokens.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(parse_duration(&[]), Ok(Duration::hours(1)));
    }

    #[test]
    fn test_magnitude_and_unit() {
        assert_eq!(parse_duration(&["3", "days"]), Ok(Duration::days(3)));
        assert_eq!(parse_duration(&["1", "hour"]), Ok(Duration::hours(1)));
        assert_eq!(parse_duration(&["1", "day"]), Ok(Duration::days(1)));
        assert_eq!(parse_duration(&["30", "minutes"]), Ok(Duration::minutes(30)));
        assert_eq!(parse_duration(&["2", "Hours"]), Ok(Duration::hours(2)));
    }

    #[test]
    fn test_compact_form() {
        assert_eq!(parse_duration(&["3days"]), Ok(Duration::days(3)));
        assert_eq!(parse_duration(&["45minutes"]), Ok(Duration::minutes(45)));
        assert!(parse_duration(&["days"]).is_err());
        assert!(parse_duration(&["3"]).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_magnitude() {
        assert!(matches!(
            parse_duration(&["three", "days"]),
            Err(Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_magnitude() {
        assert!(parse_duration(&["0", "days"]).is_err());
        assert!(parse_duration(&["-1", "days"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_unit() {
        assert!(parse_duration(&["3", "weeks"]).is_err());
        assert!(parse_duration(&["3", "fortnights"]).is_err());
    }

    #[test]
    fn test_rejects_extra_tokens() {
        assert!(parse_duration(&["3", "days", "please"]).is_err());
    }

    #[test]
    fn test_overflow_is_invalid() {
        assert!(parse_duration(&["99999999999999999999", "days"]).is_err());
        assert!(parse_duration(&["9223372036854775807", "days"]).is_err());
    }

    #[test]
    fn test_expiry_is_relative_to_now() {
        let now = Utc::now();
        assert_eq!(parse_expiry(&["3", "days"], now), Ok(now + Duration::days(3)));
        assert_eq!(parse_expiry(&[], now), Ok(now + Duration::hours(1)));
    }

    #[test]
    fn test_duration_tokens() {
        assert!(is_duration_token("3"));
        assert!(is_duration_token("hours"));
        assert!(is_duration_token("2days"));
        assert!(!is_duration_token("sassy"));
        assert!(!is_duration_token("staging"));
    }
}
