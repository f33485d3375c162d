//! Client-side period filtering and ordering over a fetched snapshot

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::record::Contribution;

/// Start of the calendar day, 00:00:00.000 UTC. Day bounds are interpreted in
/// UTC, not the browser's local zone, so filtering is deterministic.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// End of the calendar day, 23:59:59.999 UTC
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + Duration::milliseconds(86_400_000 - 1)
}

/// Keep records whose resolved creation time falls inside the inclusive day
/// range. Records whose time cannot be resolved are excluded. Bounds that are
/// not supplied are not applied; the surrounding UI rejects a filter with
/// neither bound before calling this.
pub fn filter_by_range(
    records: &[Contribution],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Contribution> {
    let start = from.map(day_start);
    let end = to.map(day_end);

    records
        .iter()
        .filter(|record| {
            let Some(time) = record.resolved_time() else {
                return false;
            };
            if let Some(start) = start {
                if time < start {
                    return false;
                }
            }
            if let Some(end) = end {
                if time > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Sort by resolved creation time, most recent first. Records without a
/// resolvable time sort as if at time zero.
pub fn sort_newest_first(records: &mut [Contribution]) {
    records.sort_by_key(|record| {
        std::cmp::Reverse(
            record
                .resolved_time()
                .map(|t| t.timestamp_millis())
                .unwrap_or(0),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, date: serde_json::Value) -> Contribution {
        serde_json::from_value(json!({ "id": id, "createdAt": date })).unwrap()
    }

    fn keys(records: &[Contribution]) -> Vec<&str> {
        records.iter().map(|c| c.key().unwrap()).collect()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_range_is_inclusive_of_both_day_bounds() {
        let records = vec![
            record("before", json!("2023-12-31T23:59:59.999Z")),
            record("first-instant", json!("2024-01-01T00:00:00.000Z")),
            record("middle", json!("2024-01-15T12:00:00Z")),
            record("last-instant", json!("2024-01-31T23:59:59.999Z")),
            record("after", json!("2024-02-01T00:00:00.000Z")),
        ];

        let kept = filter_by_range(&records, Some(date("2024-01-01")), Some(date("2024-01-31")));
        assert_eq!(keys(&kept), vec!["first-instant", "middle", "last-instant"]);
    }

    #[test]
    fn test_unresolvable_dates_are_excluded() {
        let records = vec![
            record("good", json!({ "_seconds": 1_705_000_000 })),
            record("bad", json!("garbage")),
        ];
        let kept = filter_by_range(&records, Some(date("2024-01-01")), Some(date("2024-01-31")));
        assert_eq!(keys(&kept), vec!["good"]);
    }

    #[test]
    fn test_single_sided_bounds() {
        let records = vec![
            record("old", json!("2023-06-01")),
            record("new", json!("2024-06-01")),
        ];

        let kept = filter_by_range(&records, Some(date("2024-01-01")), None);
        assert_eq!(keys(&kept), vec!["new"]);

        let kept = filter_by_range(&records, None, Some(date("2023-12-31")));
        assert_eq!(keys(&kept), vec!["old"]);
    }

    #[test]
    fn test_sort_newest_first_with_unresolvable_at_the_bottom() {
        let mut records = vec![
            record("middle", json!({ "seconds": 1_700_000_000 })),
            record("unresolvable", json!("garbage")),
            record("newest", json!({ "seconds": 1_710_000_000 })),
            record("oldest", json!({ "seconds": 1_690_000_000 })),
        ];
        sort_newest_first(&mut records);
        assert_eq!(keys(&records), vec!["newest", "middle", "oldest", "unresolvable"]);
    }
}
