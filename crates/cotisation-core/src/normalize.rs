//! Response normalization
//!
//! List endpoints answer in one of several shapes. Rather than probing for
//! alternative keys, the raw body is decoded into a tagged union and
//! flattening dispatches per variant.

use serde::Deserialize;
use serde_json::Value;

use crate::dashboard::MemberContributions;
use crate::record::{Contribution, lenient_records};

/// Every response shape a contribution-list endpoint is known to produce.
/// List positions hold raw values, decoded element-wise during flattening, so
/// one malformed element never drops the rest of the list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContributionResponse {
    /// Bare array of records
    FlatList(Vec<Value>),
    /// Dashboard-style envelope with a per-member breakdown
    MemberStats {
        #[serde(rename = "memberStats")]
        member_stats: Vec<MemberContributions>,
    },
    /// `{data: [...]}` wrapper
    Wrapped { data: Vec<Value> },
    /// `{cotisations: [...]}` wrapper
    Cotisations { cotisations: Vec<Value> },
    /// Anything else, flattened to an empty list
    Other(Value),
}

impl ContributionResponse {
    /// Produce one flat ordered sequence of records.
    ///
    /// Arrays keep every record in order, skipping elements that are not
    /// record objects. Member-stats envelopes concatenate every
    /// member's contributions in order, each record tagged with its owning
    /// member's name and id unless it already carries them.
    pub fn flatten(self) -> Vec<Contribution> {
        match self {
            ContributionResponse::FlatList(list) => lenient_records(list),
            ContributionResponse::MemberStats { member_stats } => {
                flatten_member_stats(member_stats)
            }
            ContributionResponse::Wrapped { data } => lenient_records(data),
            ContributionResponse::Cotisations { cotisations } => lenient_records(cotisations),
            ContributionResponse::Other(_) => Vec::new(),
        }
    }
}

/// Concatenate per-member contribution lists, preserving member order and the
/// order of contributions within each member.
pub fn flatten_member_stats(member_stats: Vec<MemberContributions>) -> Vec<Contribution> {
    let mut flattened = Vec::new();
    for stat in member_stats {
        for mut contribution in stat.contributions {
            if contribution.member_name.is_none() {
                contribution.member_name.clone_from(&stat.member_name);
            }
            if contribution.member_id.is_none() {
                contribution.member_id.clone_from(&stat.member_id);
            }
            flattened.push(contribution);
        }
    }
    flattened
}

/// Total flattening of any JSON value, `null` included. Never fails, never
/// returns a sentinel other than the empty list.
pub fn flatten_value(value: Value) -> Vec<Contribution> {
    match serde_json::from_value::<ContributionResponse>(value) {
        Ok(response) => response.flatten(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_array_passes_through() {
        let records = flatten_value(json!([
            { "id": "a", "amount": 100 },
            { "id": "b", "amount": 200 },
        ]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), Some("a"));
        assert_eq!(records[1].key(), Some("b"));
    }

    #[test]
    fn test_null_and_unknown_shapes_flatten_to_empty() {
        assert!(flatten_value(json!(null)).is_empty());
        assert!(flatten_value(json!({ "unexpected": true })).is_empty());
        assert!(flatten_value(json!("nope")).is_empty());
    }

    #[test]
    fn test_wrapped_shapes_unwrap() {
        let records = flatten_value(json!({ "data": [{ "id": "a" }] }));
        assert_eq!(records.len(), 1);

        let records = flatten_value(json!({ "cotisations": [{ "id": "b" }, { "id": "c" }] }));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_member_stats_flatten_preserves_count_and_order() {
        let records = flatten_value(json!({
            "memberStats": [
                {
                    "memberId": "m1",
                    "memberName": "Alice",
                    "contributions": [{ "id": "a1" }, { "id": "a2" }],
                },
                {
                    "memberId": "m2",
                    "memberName": "Bob",
                    "contributions": [{ "id": "b1" }],
                },
            ],
            "totalNetAmount": 300,
        }));

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|c| c.key().unwrap()).collect::<Vec<_>>(),
            vec!["a1", "a2", "b1"]
        );
    }

    #[test]
    fn test_member_stats_tags_owner_without_overwriting() {
        let records = flatten_value(json!({
            "memberStats": [{
                "memberId": "m1",
                "memberName": "Alice",
                "contributions": [
                    { "id": "a1" },
                    { "id": "a2", "memberName": "Alias", "memberId": "other" },
                ],
            }],
        }));

        assert_eq!(records[0].member_name.as_deref(), Some("Alice"));
        assert_eq!(records[0].member_id.as_deref(), Some("m1"));
        // pre-existing fields stay untouched
        assert_eq!(records[1].member_name.as_deref(), Some("Alias"));
        assert_eq!(records[1].member_id.as_deref(), Some("other"));
    }

    #[test]
    fn test_malformed_array_elements_are_skipped_not_fatal() {
        let records = flatten_value(json!([{ "id": "a" }, "garbage", { "id": "b" }]));
        assert_eq!(
            records.iter().map(|c| c.key().unwrap()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );

        let records = flatten_value(json!({ "data": [null, { "id": "c" }, 42] }));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key(), Some("c"));
    }

    #[test]
    fn test_malformed_member_stat_entries_keep_the_rest() {
        let records = flatten_value(json!({
            "memberStats": [{
                "memberName": "Alice",
                "contributions": [{ "id": "a1" }, 42, { "id": "a2" }],
            }],
        }));

        assert_eq!(
            records.iter().map(|c| c.key().unwrap()).collect::<Vec<_>>(),
            vec!["a1", "a2"]
        );
        assert!(records.iter().all(|c| c.member_name.as_deref() == Some("Alice")));
    }

    #[test]
    fn test_members_without_contributions_contribute_nothing() {
        let records = flatten_value(json!({
            "memberStats": [
                { "memberId": "m1", "memberName": "Alice" },
                { "memberId": "m2", "memberName": "Bob", "contributions": [{ "id": "b1" }] },
            ],
        }));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_display_name(), Some("Bob"));
    }
}
