//! Contribution records
//!
//! The backend is inconsistent about field spellings: ids arrive as `id` or
//! `_id`, amounts as `amount` or `montant`, payment channels under three
//! different keys, and the owning member's name in four places. Every spelling
//! is kept as its own optional field; accessors implement first-non-null
//! precedence so callers never probe.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::timestamp::TemporalValue;

/// Normalized contribution status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Validated,
    Rejected,
    Pending,
}

impl Status {
    /// Parse the variably-encoded wire value; anything unrecognized or missing
    /// is pending.
    pub fn parse(raw: Option<&str>) -> Status {
        let Some(raw) = raw else {
            return Status::Pending;
        };
        match raw.to_lowercase().as_str() {
            "valide" | "validated" => Status::Validated,
            "rejete" | "rejected" => Status::Rejected,
            _ => Status::Pending,
        }
    }

    /// CSS modifier used by the status badges
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Validated => "status-validated",
            Status::Rejected => "status-rejected",
            Status::Pending => "status-pending",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Validated => "validated",
            Status::Rejected => "rejected",
            Status::Pending => "pending",
        };
        f.write_str(s)
    }
}

/// A person reference nested in a contribution (`member` / `user`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    #[serde(deserialize_with = "de_string_like")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub name: Option<String>,
}

/// One contribution record as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contribution {
    #[serde(deserialize_with = "de_string_like")]
    pub id: Option<String>,
    #[serde(rename = "_id", deserialize_with = "de_string_like")]
    pub id_alt: Option<String>,

    #[serde(deserialize_with = "de_number_like")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "de_number_like")]
    pub montant: Option<f64>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<TemporalValue>,
    pub date: Option<TemporalValue>,

    #[serde(deserialize_with = "de_string_like")]
    pub status: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub etat: Option<String>,

    #[serde(deserialize_with = "de_string_like")]
    pub method: Option<String>,
    #[serde(rename = "paymentMethod", deserialize_with = "de_string_like")]
    pub payment_method: Option<String>,
    #[serde(rename = "modePaiement", deserialize_with = "de_string_like")]
    pub mode_paiement: Option<String>,

    #[serde(rename = "memberName", deserialize_with = "de_string_like")]
    pub member_name: Option<String>,
    #[serde(rename = "memberId", deserialize_with = "de_string_like")]
    pub member_id: Option<String>,
    pub member: Option<PersonRef>,
    #[serde(rename = "userName", deserialize_with = "de_string_like")]
    pub user_name: Option<String>,
    pub user: Option<PersonRef>,

    #[serde(rename = "netAmount", deserialize_with = "de_number_like")]
    pub net_amount: Option<f64>,
    #[serde(deserialize_with = "de_number_like")]
    pub commission: Option<f64>,

    #[serde(rename = "proofUrl", deserialize_with = "de_string_like")]
    pub proof_url: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub receipt: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "de_string_like")]
    pub image: Option<String>,
}

impl Contribution {
    /// Record identity: `id` else `_id`
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().or(self.id_alt.as_deref())
    }

    /// `amount` else `montant`, defaulting to zero
    pub fn amount(&self) -> f64 {
        self.amount.or(self.montant).unwrap_or(0.0)
    }

    /// Normalized status from `status` else `etat`
    pub fn status(&self) -> Status {
        Status::parse(self.status.as_deref().or(self.etat.as_deref()))
    }

    /// Payment channel: `method` / `paymentMethod` / `modePaiement`
    pub fn channel(&self) -> Option<&str> {
        self.method
            .as_deref()
            .or(self.payment_method.as_deref())
            .or(self.mode_paiement.as_deref())
    }

    /// Owning member's display name:
    /// `memberName` / `member.name` / `userName` / `user.name`
    pub fn member_display_name(&self) -> Option<&str> {
        self.member_name
            .as_deref()
            .or_else(|| self.member.as_ref().and_then(|m| m.name.as_deref()))
            .or(self.user_name.as_deref())
            .or_else(|| self.user.as_ref().and_then(|u| u.name.as_deref()))
    }

    /// Creation time, trying `createdAt` then `date`. `None` when neither
    /// resolves.
    pub fn resolved_time(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_ref()
            .and_then(TemporalValue::resolve)
            .or_else(|| self.date.as_ref().and_then(TemporalValue::resolve))
    }

    /// Payment proof image, whichever key the backend used
    pub fn proof_image(&self) -> Option<&str> {
        self.proof_url
            .as_deref()
            .or(self.receipt.as_deref())
            .or(self.photo.as_deref())
            .or(self.image.as_deref())
    }
}

/// Accept strings and numbers, map everything else to `None`
pub(crate) fn de_string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a list of records element-wise, skipping anything that is not a
/// record object. One stray `null` or string must not drop the whole list.
pub(crate) fn lenient_records(values: Vec<serde_json::Value>) -> Vec<Contribution> {
    values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

/// Accept an array of records with the same element-wise leniency; anything
/// that is not an array yields an empty list
pub(crate) fn de_record_list<'de, D>(deserializer: D) -> Result<Vec<Contribution>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => lenient_records(items),
        _ => Vec::new(),
    })
}

/// Accept numbers and numeric strings, map everything else to `None`
pub(crate) fn de_number_like<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Contribution {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_key_prefers_id_over_underscore_id() {
        let c = record(json!({ "id": "abc", "_id": "def" }));
        assert_eq!(c.key(), Some("abc"));

        let c = record(json!({ "_id": "def" }));
        assert_eq!(c.key(), Some("def"));

        let c = record(json!({ "id": 42 }));
        assert_eq!(c.key(), Some("42"));
    }

    #[test]
    fn test_amount_falls_back_to_montant() {
        assert_eq!(record(json!({ "amount": 5000 })).amount(), 5000.0);
        assert_eq!(record(json!({ "montant": 2500 })).amount(), 2500.0);
        assert_eq!(record(json!({ "montant": "1500" })).amount(), 1500.0);
        assert_eq!(record(json!({})).amount(), 0.0);
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(record(json!({ "status": "valide" })).status(), Status::Validated);
        assert_eq!(record(json!({ "status": "Validated" })).status(), Status::Validated);
        assert_eq!(record(json!({ "etat": "rejete" })).status(), Status::Rejected);
        assert_eq!(record(json!({ "status": "rejected" })).status(), Status::Rejected);
        assert_eq!(record(json!({ "status": "en attente" })).status(), Status::Pending);
        assert_eq!(record(json!({})).status(), Status::Pending);
        assert_eq!(Status::Validated.to_string(), "validated");
    }

    #[test]
    fn test_channel_precedence() {
        let c = record(json!({ "paymentMethod": "Orange Money", "modePaiement": "Wave" }));
        assert_eq!(c.channel(), Some("Orange Money"));

        let c = record(json!({ "modePaiement": "Wave" }));
        assert_eq!(c.channel(), Some("Wave"));

        assert_eq!(record(json!({})).channel(), None);
    }

    #[test]
    fn test_member_display_name_precedence() {
        let c = record(json!({
            "member": { "name": "Bob" },
            "userName": "Carol",
        }));
        assert_eq!(c.member_display_name(), Some("Bob"));

        let c = record(json!({ "user": { "name": "Dan" } }));
        assert_eq!(c.member_display_name(), Some("Dan"));

        let c = record(json!({ "memberName": "Alice", "user": { "name": "Dan" } }));
        assert_eq!(c.member_display_name(), Some("Alice"));
    }

    #[test]
    fn test_resolved_time_tries_created_at_then_date() {
        let c = record(json!({ "createdAt": { "_seconds": 1_700_000_000 } }));
        assert_eq!(
            c.resolved_time().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );

        let c = record(json!({ "createdAt": "garbage", "date": "2024-01-15" }));
        assert!(c.resolved_time().is_some());

        assert_eq!(record(json!({})).resolved_time(), None);
    }

    #[test]
    fn test_lenient_fields_never_fail_deserialization() {
        // A record full of wrong types still deserializes
        let c = record(json!({
            "id": { "nested": true },
            "amount": [1, 2],
            "status": 5,
            "method": true,
        }));
        assert_eq!(c.key(), None);
        assert_eq!(c.amount(), 0.0);
        assert_eq!(c.status(), Status::Pending);
        assert_eq!(c.channel(), None);
    }
}
