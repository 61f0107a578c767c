//! Human-readable time phrases for chat replies

use chrono::{DateTime, Duration, Utc};
use chrono_humanize::{Accuracy, HumanTime, Tense};

/// Phrase used when the last activity of a resource is unknown.
pub const UNKNOWN_ACTIVITY: &str = "a while ago";

/// Remaining time until `until`, e.g. `1 hour` or `1 hour and 30 minutes`.
///
/// Rounded up to whole minutes so a freshly taken lease reads as its full
/// length rather than a count of seconds.
#[must_use]
pub fn remaining(until: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (until - now).num_seconds().max(0);
    let minutes = seconds / 60 + i64::from(seconds % 60 != 0);
    span(Duration::minutes(minutes.max(1)))
}

/// Exact length of a span, e.g. `5 minutes` or `3 days`.
#[must_use]
pub fn span(duration: Duration) -> String {
    HumanTime::from(duration).to_text_en(Accuracy::Precise, Tense::Present)
}

/// Time since `at`, e.g. `5 minutes ago`; the placeholder when unknown.
#[must_use]
pub fn ago(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    at.map_or_else(
        || UNKNOWN_ACTIVITY.to_string(),
        |at| HumanTime::from(at - now).to_text_en(Accuracy::Rough, Tense::Past),
    )
}
