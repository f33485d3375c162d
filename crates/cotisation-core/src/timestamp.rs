//! Temporal value parsing
//!
//! Creation dates arrive in whichever encoding the backend path that produced
//! the record used: RFC 3339 strings, millisecond epoch numbers, or Firestore
//! timestamps serialized as `{seconds}` / `{_seconds}` objects.
//!
//! Parsing is total: malformed input resolves to `None`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

/// A point in time in one of the wire encodings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TemporalValue {
    /// Firestore timestamp: `{seconds}` from the SDK, `{_seconds}` once
    /// serialized through JSON
    Epoch {
        #[serde(alias = "_seconds")]
        seconds: i64,
    },
    /// Millisecond epoch
    Millis(i64),
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, or a bare `YYYY-MM-DD`
    Text(String),
    /// Anything else, kept so deserialization never fails
    Raw(serde_json::Value),
}

impl TemporalValue {
    /// Resolve to a UTC instant. Unparseable input yields `None`.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            TemporalValue::Epoch { seconds } => {
                Utc.timestamp_millis_opt(seconds.checked_mul(1000)?).single()
            }
            TemporalValue::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            TemporalValue::Text(s) => parse_text(s),
            TemporalValue::Raw(_) => None,
        }
    }
}

/// Parse any JSON value as a temporal value. Total: `null`, missing, and
/// malformed inputs all resolve to `None`.
pub fn parse(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    serde_json::from_value::<TemporalValue>(value.clone())
        .ok()?
        .resolve()
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seconds_and_underscore_seconds_resolve_identically() {
        let plain = parse(&json!({ "seconds": 1_700_000_000 }));
        let underscored = parse(&json!({ "_seconds": 1_700_000_000 }));
        assert_eq!(plain, underscored);
        assert_eq!(
            plain.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn test_firestore_extra_fields_ignored() {
        let t = parse(&json!({ "_seconds": 1_700_000_000, "_nanoseconds": 123 }));
        assert_eq!(t.map(|t| t.timestamp_millis()), Some(1_700_000_000_000));
    }

    #[test]
    fn test_millisecond_epoch() {
        let t = parse(&json!(1_700_000_000_000_i64));
        assert_eq!(t.map(|t| t.timestamp_millis()), Some(1_700_000_000_000));
    }

    #[test]
    fn test_rfc3339_string() {
        let t = parse(&json!("2024-01-15T10:30:00.000Z")).unwrap();
        assert_eq!(t.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }

    #[test]
    fn test_bare_date_string() {
        let t = parse(&json!("2024-01-15")).unwrap();
        assert_eq!(t.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-01-15T00:00:00");
    }

    #[test]
    fn test_garbage_resolves_to_none() {
        assert_eq!(parse(&json!("not a date")), None);
        assert_eq!(parse(&json!(null)), None);
        assert_eq!(parse(&json!({ "foo": "bar" })), None);
        assert_eq!(parse(&json!([1, 2, 3])), None);
    }
}
