//! Time formats shared by the wire and the database.
//!
//! Times are second precision. Input accepts minutes-only forms
//! (`09:00`, `2025-06-01T09:00`) as well as the full forms; output always
//! carries seconds.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const TIME_FORMAT_SHORT: &str = "%H:%M";
const DATE_TIME_FORMAT_SHORT: &str = "%Y-%m-%dT%H:%M";

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, TIME_FORMAT_SHORT))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM or HH:MM:SS"))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parse `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT_SHORT))
        .map_err(|_| format!("invalid date-time '{s}', expected YYYY-MM-DDTHH:MM[:SS]"))
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

/// Drop sub-second precision from a timestamp.
pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Serde adapter for `NaiveTime` fields (`#[serde(with = "crate::time::hms")]`).
pub mod hms {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `NaiveDateTime` fields.
pub mod date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date_time(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_date_time(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_accepts_short_and_full() {
        let short = parse_time("09:00").unwrap();
        let full = parse_time("09:00:00").unwrap();
        assert_eq!(short, full);
        assert_eq!(format_time(&short), "09:00:00");
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("9am").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_parse_date_time_accepts_minutes_only() {
        let dt = parse_date_time("2025-06-01T09:00").unwrap();
        assert_eq!(format_date_time(&dt), "2025-06-01T09:00:00");
    }

    #[test]
    fn test_parse_date_rejects_other_layouts() {
        assert!(parse_date("01/06/2025").is_err());
        assert_eq!(format_date(&parse_date("2025-06-01").unwrap()), "2025-06-01");
    }

    #[test]
    fn test_truncate_to_seconds() {
        let dt = NaiveDateTime::parse_from_str("2025-06-01T09:00:00.750", "%Y-%m-%dT%H:%M:%S%.f")
            .unwrap();
        assert_eq!(format_date_time(&truncate_to_seconds(dt)), "2025-06-01T09:00:00");
        assert_eq!(truncate_to_seconds(dt).nanosecond(), 0);
    }
}
