//! Committee roster

use serde::Deserialize;

use super::error::ApiResult;
use super::http;
use crate::session::Session;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub id_alt: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl Member {
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().or(self.id_alt.as_deref())
    }

    pub fn display_name(&self) -> String {
        match (self.name.as_deref(), self.surname.as_deref()) {
            (Some(name), Some(surname)) => format!("{} {}", name, surname),
            (Some(name), None) => name.to_string(),
            (None, Some(surname)) => surname.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

/// Roster response: bare array or `{data}` / `{users}` wrapper
#[derive(Deserialize)]
#[serde(untagged)]
enum UsersResponse {
    List(Vec<Member>),
    Data { data: Vec<Member> },
    Users { users: Vec<Member> },
    Other(serde_json::Value),
}

/// Fetch the roster; a supervisor only sees their committee's members
pub async fn get_users(session: &Session) -> ApiResult<Vec<Member>> {
    let response: UsersResponse = http::get_json(session, "/users").await?;
    Ok(match response {
        UsersResponse::List(members) => members,
        UsersResponse::Data { data } => data,
        UsersResponse::Users { users } => users,
        UsersResponse::Other(_) => Vec::new(),
    })
}
