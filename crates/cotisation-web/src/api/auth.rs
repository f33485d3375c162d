//! Identity-provider REST calls
//!
//! Sign-in exchanges email/password for a bearer ID token. The provider
//! itself (accounts, password storage) is external; only its REST surface is
//! consumed here.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared::CONFIG;

use super::error::{ApiError, ApiResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
}

/// Exchange credentials for a bearer token
pub async fn sign_in(email: &str, password: &str) -> ApiResult<String> {
    let request = Request::post(CONFIG.sign_in_url)
        .json(&SignInRequest {
            email,
            password,
            return_secure_token: true,
        })
        .map_err(|_| ApiError::Decode)?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        web_sys::console::error_1(&format!("Sign-in failed: {}", response.status()).into());
        return Err(ApiError::Status(response.status()));
    }

    let body: SignInResponse = response.json().await.map_err(|_| ApiError::Decode)?;
    Ok(body.id_token)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

/// Ask the identity provider to send a password-reset email
pub async fn request_password_reset(email: &str) -> ApiResult<()> {
    let request = Request::post(CONFIG.password_reset_url)
        .json(&ResetRequest {
            request_type: "PASSWORD_RESET",
            email,
        })
        .map_err(|_| ApiError::Decode)?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        web_sys::console::error_1(&format!("Password reset failed: {}", response.status()).into());
        return Err(ApiError::Status(response.status()));
    }
    Ok(())
}
