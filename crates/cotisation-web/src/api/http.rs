//! HTTP plumbing for the cotisation API
//!
//! Attaches the session's bearer token to every request, maps status codes to
//! the error taxonomy, and logs failures to the browser console. A 401
//! expires the session, which navigates back to sign-in.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::CONFIG;

use super::error::{ApiError, ApiResult};
use crate::session::Session;

fn url(path: &str) -> String {
    format!("{}{}", CONFIG.api_base_url, path)
}

fn authorize(builder: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn check(response: Response, session: &Session) -> ApiResult<Response> {
    match response.status() {
        200..=299 => Ok(response),
        401 => {
            web_sys::console::error_1(&"API 401: expiring session".into());
            session.expire();
            Err(ApiError::Unauthorized)
        }
        403 => Err(ApiError::Forbidden),
        404 => Err(ApiError::NotFound),
        status => {
            web_sys::console::error_1(&format!("API error: {}", status).into());
            Err(ApiError::Status(status))
        }
    }
}

/// Lenient body read: empty and non-JSON bodies become `null`
async fn read_value(response: Response) -> serde_json::Value {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str(&text).unwrap_or(serde_json::Value::Null)
}

pub async fn get_json<T: DeserializeOwned>(session: &Session, path: &str) -> ApiResult<T> {
    let response = authorize(Request::get(&url(path)), session)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response, session)?
        .json()
        .await
        .map_err(|_| ApiError::Decode)
}

/// Fetch an endpoint whose response shape is not pinned down; the raw JSON
/// value goes to the normalizer.
pub async fn get_value(session: &Session, path: &str) -> ApiResult<serde_json::Value> {
    let response = authorize(Request::get(&url(path)), session)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response, session)?;
    Ok(read_value(response).await)
}

pub async fn put_json(
    session: &Session,
    path: &str,
    body: &impl Serialize,
) -> ApiResult<serde_json::Value> {
    let request = authorize(Request::put(&url(path)), session)
        .json(body)
        .map_err(|_| ApiError::Decode)?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response, session)?;
    Ok(read_value(response).await)
}

pub async fn put_empty(session: &Session, path: &str) -> ApiResult<serde_json::Value> {
    let response = authorize(Request::put(&url(path)), session)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response, session)?;
    Ok(read_value(response).await)
}

pub async fn post_form(
    session: &Session,
    path: &str,
    form: web_sys::FormData,
) -> ApiResult<serde_json::Value> {
    let request = authorize(Request::post(&url(path)), session)
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response, session)?;
    Ok(read_value(response).await)
}
