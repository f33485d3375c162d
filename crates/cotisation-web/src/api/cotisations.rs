//! Cotisation endpoints
//!
//! Every list endpoint goes through the core normalizer, so callers always
//! see one flat, newest-first sequence regardless of the shape the server
//! picked. Committee-wide listings chain fallbacks and only surface the
//! primary failure when every fallback also fails.

use chrono::NaiveDate;
use cotisation_core::query::period_query;
use cotisation_core::{Contribution, DashboardPayload, flatten_value, sort_newest_first};
use serde::Serialize;
use web_sys::FormData;

use super::error::{ApiError, ApiResult};
use super::http;
use crate::session::Session;

/// Fetch a list endpoint and normalize whatever shape comes back.
/// A 404 answer is an empty list, not a failure.
async fn fetch_flattened(session: &Session, path: &str) -> ApiResult<Vec<Contribution>> {
    let value = match http::get_value(session, path).await {
        Ok(value) => value,
        Err(ApiError::NotFound) => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    let mut records = flatten_value(value);
    sort_newest_first(&mut records);
    Ok(records)
}

async fn with_fallback(
    session: &Session,
    primary: &str,
    fallback: &str,
) -> ApiResult<Vec<Contribution>> {
    match fetch_flattened(session, primary).await {
        Ok(records) => Ok(records),
        Err(primary_err) => match fetch_flattened(session, fallback).await {
            Ok(records) => Ok(records),
            // surface the original failure, not the fallback's
            Err(_) => Err(primary_err),
        },
    }
}

/// The signed-in member's own history
pub async fn member_history(session: &Session) -> ApiResult<Vec<Contribution>> {
    fetch_flattened(session, "/cotisations/member/history").await
}

/// The signed-in member's history, range-filtered server-side
pub async fn member_period(
    session: &Session,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ApiResult<Vec<Contribution>> {
    let path = format!("/cotisations/member/period?{}", period_query(from, to));
    fetch_flattened(session, &path).await
}

/// Aggregated committee statistics plus the per-member breakdown
pub async fn manager_dashboard(session: &Session) -> ApiResult<DashboardPayload> {
    http::get_json(session, "/cotisations/manager/dashboard").await
}

/// Committee-wide history, falling back to the unfiltered period endpoint
pub async fn manager_history(session: &Session) -> ApiResult<Vec<Contribution>> {
    with_fallback(
        session,
        "/cotisations/manager/history",
        "/cotisations/manager/period",
    )
    .await
}

/// Every committee contribution, same fallback as the history listing
pub async fn manager_all(session: &Session) -> ApiResult<Vec<Contribution>> {
    with_fallback(
        session,
        "/cotisations/manager/all",
        "/cotisations/manager/period",
    )
    .await
}

/// Committee contributions inside a date range
pub async fn manager_period(
    session: &Session,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ApiResult<Vec<Contribution>> {
    let path = format!("/cotisations/manager/period?{}", period_query(from, to));
    fetch_flattened(session, &path).await
}

/// One member's contributions as seen by their supervisor
pub async fn member_contributions(
    session: &Session,
    member_id: &str,
) -> ApiResult<Vec<Contribution>> {
    with_fallback(
        session,
        &format!("/cotisations/manager/member/{}", member_id),
        &format!("/cotisations/member/{}", member_id),
    )
    .await
}

/// Contributions awaiting review
pub async fn pending(session: &Session) -> ApiResult<Vec<Contribution>> {
    fetch_flattened(session, "/cotisations/pending").await
}

pub async fn validate(session: &Session, id: &str) -> ApiResult<()> {
    http::put_empty(session, &format!("/cotisations/{}/validate", id)).await?;
    Ok(())
}

#[derive(Serialize)]
struct RejectBody<'a> {
    reason: &'a str,
}

pub async fn reject(session: &Session, id: &str, reason: &str) -> ApiResult<()> {
    http::put_json(
        session,
        &format!("/cotisations/{}/reject", id),
        &RejectBody { reason },
    )
    .await?;
    Ok(())
}

/// Member submits a contribution. The amount and channel are sent under every
/// key spelling the backend is known to accept. `force_validate` skips the
/// review queue; only trusted callers set it.
pub async fn submit(
    session: &Session,
    amount: f64,
    method: &str,
    force_validate: bool,
) -> ApiResult<()> {
    let form = new_form()?;
    let amount = amount.to_string();
    append(&form, "amount", &amount)?;
    append(&form, "montant", &amount)?;
    append(&form, "method", method)?;
    append(&form, "paymentMethod", method)?;
    append(&form, "modePaiement", method)?;
    if force_validate {
        append(&form, "forceValidate", "true")?;
    }

    http::post_form(session, "/cotisations", form).await?;
    Ok(())
}

/// A supervisor submitting on a member's behalf
pub struct ForMemberSubmission {
    pub member_id: String,
    pub amount: f64,
    pub method: String,
    pub operator: Option<String>,
    pub transaction_id: Option<String>,
    pub reference: Option<String>,
    pub proof: Option<web_sys::File>,
}

pub async fn submit_for_member(
    session: &Session,
    submission: &ForMemberSubmission,
) -> ApiResult<()> {
    let form = new_form()?;
    append(&form, "memberId", &submission.member_id)?;
    append(&form, "amount", &submission.amount.to_string())?;
    append(&form, "method", &submission.method)?;
    if let Some(operator) = &submission.operator {
        append(&form, "operator", operator)?;
    }
    if let Some(transaction_id) = &submission.transaction_id {
        append(&form, "transactionId", transaction_id)?;
    }
    if let Some(reference) = &submission.reference {
        append(&form, "reference", reference)?;
    }
    if let Some(proof) = &submission.proof {
        form.append_with_blob("proof", proof)
            .map_err(|_| form_error())?;
    }

    http::post_form(session, "/cotisations/for-member", form).await?;
    Ok(())
}

fn new_form() -> ApiResult<FormData> {
    FormData::new().map_err(|_| form_error())
}

fn append(form: &FormData, key: &str, value: &str) -> ApiResult<()> {
    form.append_with_str(key, value).map_err(|_| form_error())
}

fn form_error() -> ApiError {
    ApiError::Network("construction du formulaire impossible".to_string())
}
