//! Period query construction
//!
//! The server's date-filter parameter convention is not pinned down, so each
//! bound is sent under several spellings plus millisecond-epoch variants.
//! TODO: collapse to a single parameter pair once the server contract is
//! fixed; call sites only ever go through `period_query`, so this is the one
//! place to change.

use chrono::{NaiveDate, SecondsFormat};

use crate::filter::{day_end, day_start};

const START_KEYS: [&str; 4] = ["startDate", "start_date", "from", "start"];
const END_KEYS: [&str; 4] = ["endDate", "end_date", "to", "end"];

/// Build the fanned-out query string for a date-range request. Empty when
/// neither bound is supplied.
pub fn period_query(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let Some(from) = from {
        let start = day_start(from);
        let iso = start.to_rfc3339_opts(SecondsFormat::Millis, true);
        for key in START_KEYS {
            params.push((key, iso.clone()));
        }
        let ms = start.timestamp_millis().to_string();
        params.push(("start_ms", ms.clone()));
        params.push(("startEpoch", ms));
    }

    if let Some(to) = to {
        let end = day_end(to);
        let iso = end.to_rfc3339_opts(SecondsFormat::Millis, true);
        for key in END_KEYS {
            params.push((key, iso.clone()));
        }
        let ms = end.timestamp_millis().to_string();
        params.push(("end_ms", ms.clone()));
        params.push(("endEpoch", ms));
    }

    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode the single reserved character our RFC 3339 values contain
fn encode(value: &str) -> String {
    value.replace(':', "%3A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_range_fans_out_all_keys() {
        let query = period_query(Some(date("2024-01-01")), Some(date("2024-01-31")));

        for key in START_KEYS.iter().chain(END_KEYS.iter()) {
            assert!(query.contains(&format!("{}=", key)), "missing {}", key);
        }
        assert!(query.contains("start_ms=1704067200000"));
        assert!(query.contains("startEpoch=1704067200000"));
        assert!(query.contains("end_ms=1706745599999"));
        assert!(query.contains("endEpoch=1706745599999"));
    }

    #[test]
    fn test_bounds_are_day_edges() {
        let query = period_query(Some(date("2024-01-01")), Some(date("2024-01-31")));
        assert!(query.contains("startDate=2024-01-01T00%3A00%3A00.000Z"));
        assert!(query.contains("endDate=2024-01-31T23%3A59%3A59.999Z"));
    }

    #[test]
    fn test_single_bound_and_empty() {
        let query = period_query(Some(date("2024-01-01")), None);
        assert!(query.contains("startDate="));
        assert!(!query.contains("endDate="));

        assert_eq!(period_query(None, None), "");
    }
}
