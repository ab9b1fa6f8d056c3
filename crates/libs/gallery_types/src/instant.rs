//! Canonical-instant helpers.
//!
//! Gallery and photo dates are stored as canonical instants
//! (`DateTime<Utc>`), never as display strings. Date-only values (a
//! gallery's date, a photo's taken-at day) are snapped to midnight UTC so
//! formatting is stable regardless of viewer timezone and idempotent under
//! repeated round-trips.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse a raw instant string: epoch milliseconds are attempted before
/// ISO-8601, so numeric-looking strings are never misread as dates.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(millis) = trimmed.parse::<i64>() {
        return from_epoch_millis(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Compose a calendar-picker selection into a canonical instant at UTC
/// midnight. `month0` is 0-indexed, matching the picker wheel.
#[must_use]
pub fn compose_instant(year: i32, month0: u32, day: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month0 + 1, day)?;
    Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Snap an instant to midnight UTC of its calendar date. Idempotent.
#[must_use]
pub fn normalize_date_only(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&instant.date_naive().and_time(NaiveTime::MIN))
}

/// Lenient serde for optional wire dates: the backend has historically
/// returned epoch milliseconds (as number or string) as well as ISO-8601.
/// Unreadable values become `None` rather than a decode failure.
pub mod lenient_instant {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => {
                serializer.serialize_some(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::Number(number)) => number.as_i64().and_then(super::from_epoch_millis),
            Some(Value::String(text)) => super::parse_instant(&text),
            _ => None,
        })
    }
}
