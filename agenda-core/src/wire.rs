//! Serde helpers for the shapes the agenda server actually sends.
//!
//! Server records are loosely typed: timestamps come as RFC 3339 or as bare
//! SQL-style `2025-03-20 09:00:00`, and update payloads use `null` to clear a
//! field. These helpers let one odd value degrade on its own instead of
//! failing the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Timestamp layouts without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a server timestamp: RFC 3339 first, then the naive layouts, then a
/// bare date at midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// A timestamp from any JSON value; numbers are Unix seconds.
///
/// `None` for `null` and for anything unreadable, which is logged.
fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::Null => return None,
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    };

    if parsed.is_none() {
        tracing::warn!(%value, "ignoring unreadable timestamp");
    }
    parsed
}

/// `Option<DateTime<Utc>>` fields: lenient on the way in, RFC 3339 on the way out.
///
/// ```ignore
/// #[serde(default, with = "crate::wire::timestamp")]
/// start: Option<DateTime<Utc>>,
/// ```
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(timestamp_from_value(&value))
    }
}

/// Timestamp fields of a partial update.
///
/// Absent stays `None` (via `#[serde(default)]`), `null` becomes
/// `Some(None)`, and an unreadable value is treated as absent so it can't
/// wipe a good stored timestamp.
pub mod patch_timestamp {
    use super::*;

    pub fn serialize<S>(
        value: &Option<Option<DateTime<Utc>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => timestamp::serialize(inner, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Some(None),
            value => timestamp_from_value(&value).map(Some),
        })
    }
}

/// Tell a present `null` apart from a missing field.
///
/// Use with `#[serde(default)]`: missing is `None`, `null` is `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Span {
        #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
        start: Option<DateTime<Utc>>,
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_timestamp_layouts() {
        assert_eq!(parse_timestamp("2025-03-20T09:00:00Z"), Some(at(9, 0)));
        assert_eq!(parse_timestamp("2025-03-20T10:00:00+01:00"), Some(at(9, 0)));
        assert_eq!(parse_timestamp("2025-03-20 09:00:00"), Some(at(9, 0)));
        assert_eq!(parse_timestamp("2025-03-20 09:30"), Some(at(9, 30)));
        assert_eq!(parse_timestamp("2025-03-20T09:30"), Some(at(9, 30)));
        assert_eq!(parse_timestamp(" 2025-03-20 "), Some(at(0, 0)));
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn test_unreadable_timestamp_degrades_to_none() {
        let span: Span = serde_json::from_value(json!({"start": "soon"})).unwrap();
        assert_eq!(span.start, None);

        let span: Span = serde_json::from_value(json!({"start": [1, 2]})).unwrap();
        assert_eq!(span.start, None);
    }

    #[test]
    fn test_timestamp_written_as_rfc3339() {
        let span: Span = serde_json::from_value(json!({"start": "2025-03-20 09:00:00"})).unwrap();
        assert_eq!(
            serde_json::to_value(&span).unwrap(),
            json!({"start": "2025-03-20T09:00:00Z"})
        );
    }

    #[test]
    fn test_unix_seconds_timestamp() {
        let span: Span = serde_json::from_value(json!({"start": 1742461200})).unwrap();
        assert_eq!(span.start, Some(at(9, 0)));
    }
}
