//! Manager dashboard aggregates
//!
//! The dashboard endpoint returns committee-wide totals plus a per-member
//! contribution breakdown in one payload; everything the view shows is derived
//! from that single snapshot.

use serde::Deserialize;

use crate::record::{Contribution, de_record_list, de_string_like};

/// Committee-wide totals
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_contributions: f64,
    pub total_commissions: f64,
    pub total_net_amount: f64,
    pub total_committee_share: f64,
    pub total_manager_share: f64,
    pub total_admin_share: f64,
    pub member_count: u32,
}

/// One member's entry in the dashboard breakdown
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberContributions {
    #[serde(deserialize_with = "de_string_like")]
    pub member_id: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub member_name: Option<String>,
    #[serde(deserialize_with = "de_record_list")]
    pub contributions: Vec<Contribution>,
}

/// Full dashboard payload: totals plus the per-member breakdown
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardPayload {
    #[serde(rename = "memberStats")]
    pub member_stats: Vec<MemberContributions>,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

/// One category of the three-way net split
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub css_class: &'static str,
    pub amount: f64,
    /// Raw share of the net total, deliberately unclamped
    pub percent: f64,
}

impl DistributionSlice {
    /// Bar width for rendering, bounded at 100 against upstream rounding
    pub fn bar_width(&self) -> f64 {
        self.percent.min(100.0)
    }
}

/// Percentage-of-net distribution across the three fixed categories, in fixed
/// order: committee, manager, admin. A non-positive net total yields all
/// zeros rather than a division error.
pub fn distribution(stats: &DashboardStats) -> [DistributionSlice; 3] {
    let slice = |label, css_class, amount: f64| {
        let percent = if stats.total_net_amount > 0.0 {
            amount / stats.total_net_amount * 100.0
        } else {
            0.0
        };
        DistributionSlice {
            label,
            css_class,
            amount,
            percent,
        }
    };

    [
        slice("Comité", "committee", stats.total_committee_share),
        slice("Manager", "manager", stats.total_manager_share),
        slice("Admin", "admin", stats.total_admin_share),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distribution_fixed_order_and_percentages() {
        let stats = DashboardStats {
            total_net_amount: 100.0,
            total_committee_share: 30.0,
            total_manager_share: 10.0,
            total_admin_share: 10.0,
            ..Default::default()
        };
        let dist = distribution(&stats);
        assert_eq!(
            dist.iter().map(|d| d.label).collect::<Vec<_>>(),
            vec!["Comité", "Manager", "Admin"]
        );
        assert_eq!(
            dist.iter().map(|d| d.percent).collect::<Vec<_>>(),
            vec![30.0, 10.0, 10.0]
        );
    }

    #[test]
    fn test_distribution_zero_net_total() {
        let stats = DashboardStats {
            total_committee_share: 30.0,
            total_manager_share: 10.0,
            total_admin_share: 10.0,
            ..Default::default()
        };
        let dist = distribution(&stats);
        assert!(dist.iter().all(|d| d.percent == 0.0));
    }

    #[test]
    fn test_bar_width_clamps_but_percent_does_not() {
        let stats = DashboardStats {
            total_net_amount: 50.0,
            total_committee_share: 80.0,
            ..Default::default()
        };
        let committee = &distribution(&stats)[0];
        assert_eq!(committee.percent, 160.0);
        assert_eq!(committee.bar_width(), 100.0);
    }

    #[test]
    fn test_payload_decodes_totals_and_breakdown() {
        let payload: DashboardPayload = serde_json::from_value(json!({
            "totalContributions": 10_000,
            "totalCommissions": 500,
            "totalNetAmount": 9_500,
            "totalCommitteeShare": 5_700,
            "totalManagerShare": 1_900,
            "totalAdminShare": 1_900,
            "memberCount": 3,
            "memberStats": [
                { "memberId": "m1", "memberName": "Alice", "contributions": [{ "amount": 4000 }] },
                { "memberId": "m2", "memberName": "Bob", "contributions": [] },
            ],
        }))
        .unwrap();

        assert_eq!(payload.stats.total_net_amount, 9_500.0);
        assert_eq!(payload.stats.member_count, 3);
        assert_eq!(payload.member_stats.len(), 2);
        assert_eq!(payload.member_stats[0].member_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_dashboard_payload_end_to_end() {
        // One fetch feeds both the table rows and the distribution bars
        let body = json!({
            "memberStats": [{
                "memberName": "Alice",
                "contributions": [{
                    "amount": 5000,
                    "createdAt": { "_seconds": 1_700_000_000 },
                    "status": "valide",
                }],
            }],
            "totalNetAmount": 5000,
            "totalCommitteeShare": 3000,
            "totalManagerShare": 1000,
            "totalAdminShare": 1000,
        });

        let rows = crate::normalize::flatten_value(body.clone());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_display_name(), Some("Alice"));
        assert_eq!(rows[0].amount(), 5000.0);
        assert_eq!(rows[0].status().to_string(), "validated");
        assert!(rows[0].resolved_time().is_some());

        let payload: DashboardPayload = serde_json::from_value(body).unwrap();
        let dist = distribution(&payload.stats);
        assert_eq!(
            dist.iter().map(|d| d.percent).collect::<Vec<_>>(),
            vec![60.0, 20.0, 20.0]
        );
    }

    #[test]
    fn test_payload_tolerates_non_record_contribution_entries() {
        let payload: DashboardPayload = serde_json::from_value(json!({
            "memberStats": [{
                "memberName": "Alice",
                "contributions": [{ "amount": 1000 }, "garbage"],
            }],
            "totalNetAmount": 1000,
        }))
        .unwrap();

        assert_eq!(payload.member_stats[0].contributions.len(), 1);
        assert_eq!(payload.stats.total_net_amount, 1000.0);
    }

    #[test]
    fn test_payload_missing_fields_default() {
        let payload: DashboardPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.stats, DashboardStats::default());
        assert!(payload.member_stats.is_empty());
    }
}
