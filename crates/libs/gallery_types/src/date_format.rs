//! Display formatting for canonical instants, driven by a named format.
//!
//! The format names travel over the wire (the display-settings record
//! stores one), so the serde representation matches the backend's enum
//! labels. Unknown names fall back to the most verbose variant instead of
//! failing: a stale settings record must never break rendering.

use crate::instant::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DateFormat {
    /// "Sun, 20 Jul 2025"
    #[serde(rename = "EEE_D_MMM_YYYY")]
    ShortWeekdayShortMonth,
    /// "Sunday, 20 Jul 2025"
    #[serde(rename = "EEEE_D_MMM_YYYY")]
    LongWeekdayShortMonth,
    /// "Sunday, 20 July 2025"
    #[default]
    #[serde(rename = "EEEE_D_MMMM_YYYY")]
    LongWeekdayLongMonth,
    /// "20 Jul 2025"
    #[serde(rename = "D_MMM_YYYY")]
    ShortMonth,
    /// "20 July 2025"
    #[serde(rename = "D_MMMM_YYYY")]
    LongMonth,
    /// "20 Jul"
    #[serde(rename = "D_MMM")]
    ShortMonthNoYear,
    /// "20 July"
    #[serde(rename = "D_MMMM")]
    LongMonthNoYear,
}

impl DateFormat {
    /// Resolve a wire name. Unknown names fall back to the most verbose
    /// variant (long weekday, long month).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "EEE_D_MMM_YYYY" => Self::ShortWeekdayShortMonth,
            "EEEE_D_MMM_YYYY" => Self::LongWeekdayShortMonth,
            "D_MMM_YYYY" => Self::ShortMonth,
            "D_MMMM_YYYY" => Self::LongMonth,
            "D_MMM" => Self::ShortMonthNoYear,
            "D_MMMM" => Self::LongMonthNoYear,
            _ => Self::LongWeekdayLongMonth,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortWeekdayShortMonth => "EEE_D_MMM_YYYY",
            Self::LongWeekdayShortMonth => "EEEE_D_MMM_YYYY",
            Self::LongWeekdayLongMonth => "EEEE_D_MMMM_YYYY",
            Self::ShortMonth => "D_MMM_YYYY",
            Self::LongMonth => "D_MMMM_YYYY",
            Self::ShortMonthNoYear => "D_MMM",
            Self::LongMonthNoYear => "D_MMMM",
        }
    }

    const fn pattern(self) -> &'static str {
        match self {
            Self::ShortWeekdayShortMonth => "%a, %-d %b %Y",
            Self::LongWeekdayShortMonth => "%A, %-d %b %Y",
            Self::LongWeekdayLongMonth => "%A, %-d %B %Y",
            Self::ShortMonth => "%-d %b %Y",
            Self::LongMonth => "%-d %B %Y",
            Self::ShortMonthNoYear => "%-d %b",
            Self::LongMonthNoYear => "%-d %B",
        }
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Format an already-canonical instant.
#[must_use]
pub fn format_datetime(instant: &DateTime<Utc>, format: DateFormat) -> String {
    instant.format(format.pattern()).to_string()
}

/// Format a raw instant string (epoch millis or ISO-8601). Invalid input
/// yields an empty string, never an error.
#[must_use]
pub fn format_instant(raw: &str, format: DateFormat) -> String {
    parse_instant(raw).map_or_else(String::new, |instant| format_datetime(&instant, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::{compose_instant, parse_instant};

    #[test]
    fn epoch_millis_format_short_month() {
        // 1721433600000 is 2024-07-20T00:00:00Z, a normalized date-only
        // instant.
        assert_eq!(
            format_instant("1721433600000", DateFormat::ShortMonth),
            "20 Jul 2024"
        );
    }

    #[test]
    fn weekday_variants() {
        // 2024-07-20 is a Saturday.
        assert_eq!(
            format_instant("2024-07-20", DateFormat::ShortWeekdayShortMonth),
            "Sat, 20 Jul 2024"
        );
        assert_eq!(
            format_instant("2024-07-20", DateFormat::LongWeekdayLongMonth),
            "Saturday, 20 July 2024"
        );
    }

    #[test]
    fn unknown_name_falls_back_to_most_verbose() {
        assert_eq!(
            DateFormat::from_name("YY_SLASH_MM"),
            DateFormat::LongWeekdayLongMonth
        );
        assert_eq!(DateFormat::from_name(""), DateFormat::LongWeekdayLongMonth);
    }

    #[test]
    fn invalid_instant_formats_to_empty_string() {
        assert_eq!(format_instant("not a date", DateFormat::ShortMonth), "");
        assert_eq!(format_instant("", DateFormat::ShortMonth), "");
    }

    #[test]
    fn date_only_round_trip_is_stable() {
        let composed = compose_instant(2024, 6, 20).expect("valid date");
        let first = format_datetime(&composed, DateFormat::ShortMonth);

        // Picking the same calendar day again yields the same canonical
        // instant, and formatting it twice yields the same string.
        let reselected = compose_instant(2024, 6, 20).expect("valid date");
        assert_eq!(reselected, composed);
        assert_eq!(format_datetime(&reselected, DateFormat::ShortMonth), first);

        let normalized = crate::instant::normalize_date_only(composed);
        assert_eq!(normalized, composed);
        assert_eq!(
            parse_instant(&composed.to_rfc3339()).expect("canonical reparse"),
            composed
        );
    }
}
