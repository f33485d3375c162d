//! Current user's profile

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use super::http;
use crate::session::Session;

/// Application roles, normalized from the free-form wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Supervisor,
    Admin,
    Unknown,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "Membre",
            Role::Supervisor => "Superviseur",
            Role::Admin => "Administrateur",
            Role::Unknown => "Rôle non reconnu",
        }
    }

    /// Landing route for the role's home view
    pub fn home_href(&self) -> &'static str {
        match self {
            Role::Member => "/member/cotisations",
            Role::Supervisor => "/manager/dashboard",
            _ => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Committee {
    pub name: Option<String>,
    pub libelle: Option<String>,
}

impl Committee {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.libelle.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub age: Option<u32>,
    pub professional_status: Option<String>,
    pub committee: Option<Committee>,
}

impl Profile {
    /// Database role values are inconsistent (`gérant`, `superviseur`, ...)
    pub fn normalized_role(&self) -> Role {
        let lowered = self.role.as_deref().map(|r| r.to_lowercase());
        match lowered.as_deref() {
            Some("membre" | "member") => Role::Member,
            Some("gérant" | "gerant" | "superviseur" | "supervisor") => Role::Supervisor,
            Some("administrateur" | "admin") => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Membre".to_string())
    }

    pub fn committee_name(&self) -> String {
        self.committee
            .as_ref()
            .and_then(Committee::display_name)
            .unwrap_or("Non assigné")
            .to_string()
    }
}

/// Editable subset of the profile; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_status: Option<String>,
}

pub async fn get_my_profile(session: &Session) -> ApiResult<Profile> {
    http::get_json(session, "/users/profile/me").await
}

pub async fn update_my_profile(session: &Session, update: &ProfileUpdate) -> ApiResult<Profile> {
    let value = http::put_json(session, "/users/profile/me", update).await?;
    // The server sometimes wraps the fresh profile in `{profile: ...}`
    let value = match value {
        serde_json::Value::Object(mut map) if map.contains_key("profile") => {
            map.remove("profile").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|_| ApiError::Decode)
}
