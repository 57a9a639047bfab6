//! Lenient date decoding
//!
//! The server sends plain `YYYY-MM-DD` dates for most fields but full
//! timestamps for a few older ones. Both decode to a [`NaiveDate`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

fn parse(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Deserialize an optional date given as a date or a timestamp.
pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse(raw.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw:?}"))),
    }
}
