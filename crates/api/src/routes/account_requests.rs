//! Account-request intake and review routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::require_text;
use crate::AppState;
use cashcall_db::entities::account_requests;
use cashcall_db::repositories::{
    AccountRequestRepository, ActivityLogRepository, AffiliateRepository,
    CreateAccountRequestInput,
};

/// Creates the account-request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account-requests", post(submit_request).get(list_requests))
        .route("/account-requests/{id}/reject", post(reject_request))
        .route("/account-requests/{id}/request-info", post(request_info))
}

/// Request body for the public intake form. Every field is optional at the
/// deserialization layer so missing values fail with 400 rather than 422.
#[derive(Debug, Deserialize)]
pub struct SubmitRequestBody {
    /// Applicant email.
    pub email: Option<String>,
    /// Applicant full name.
    pub full_name: Option<String>,
    /// Applicant job position.
    pub position: Option<String>,
    /// Applicant department.
    pub department: Option<String>,
    /// Applicant contact phone.
    pub phone: Option<String>,
    /// Affiliate company the applicant belongs to.
    pub affiliate_company_id: Option<Uuid>,
    /// Why the applicant needs access.
    pub reason_for_access: Option<String>,
    /// Approving manager's name.
    pub manager_name: Option<String>,
    /// Approving manager's email.
    pub manager_email: Option<String>,
}

/// Request body for rejecting a request.
#[derive(Debug, Deserialize)]
pub struct RejectRequestBody {
    /// The rejection reason.
    pub reason: Option<String>,
    /// Optional explicit review notes.
    pub notes: Option<String>,
}

/// Request body for asking the applicant for more information.
#[derive(Debug, Deserialize)]
pub struct RequestInfoBody {
    /// The message for the applicant.
    pub message: Option<String>,
}

/// An account request with its affiliate name, as listed.
#[derive(Debug, Serialize)]
pub struct AccountRequestResponse {
    /// The request record.
    #[serde(flatten)]
    pub request: account_requests::Model,
    /// The affiliate company name, when the request names one.
    pub affiliate_name: Option<String>,
}

/// POST `/account-requests` - Public intake.
async fn submit_request(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = CreateAccountRequestInput {
        email: require_text(body.email, "email")?,
        full_name: require_text(body.full_name, "full_name")?,
        position: require_text(body.position, "position")?,
        department: require_text(body.department, "department")?,
        phone: require_text(body.phone, "phone")?,
        affiliate_company_id: body.affiliate_company_id,
        reason_for_access: require_text(body.reason_for_access, "reason_for_access")?,
        manager_name: require_text(body.manager_name, "manager_name")?,
        manager_email: require_text(body.manager_email, "manager_email")?,
    };

    if let Some(affiliate_id) = input.affiliate_company_id {
        let affiliates = AffiliateRepository::new((*state.db).clone());
        if affiliates.find_by_id(affiliate_id).await?.is_none() {
            return Err(ApiError::validation(format!(
                "Unknown affiliate: {affiliate_id}"
            )));
        }
    }

    let repo = AccountRequestRepository::new((*state.db).clone());
    let request = repo.create(input).await.map_err(|e| {
        error!(error = %e, "Failed to create account request");
        ApiError::from(e)
    })?;

    info!(request_id = %request.id, "Account request submitted");

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            None,
            "account_request_submitted",
            "account_request",
            request.id,
            json!({ "email": request.email }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok(Json(json!({ "success": true, "request_id": request.id })))
}

/// GET `/account-requests` - List all requests, newest first.
async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountRequestResponse>>, ApiError> {
    let repo = AccountRequestRepository::new((*state.db).clone());
    let rows = repo.list().await.map_err(|e| {
        error!(error = %e, "Failed to list account requests");
        ApiError::from(e)
    })?;

    Ok(Json(
        rows.into_iter()
            .map(|row| AccountRequestResponse {
                request: row.request,
                affiliate_name: row.affiliate_name,
            })
            .collect(),
    ))
}

/// POST `/account-requests/{id}/reject` - Reject a pending request.
async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequestBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reason = require_text(body.reason, "reason")?;

    let repo = AccountRequestRepository::new((*state.db).clone());
    let (request, action) = repo.reject(id, &reason, body.notes).await.map_err(|e| {
        error!(error = %e, request_id = %id, "Failed to reject account request");
        ApiError::from(e)
    })?;

    info!(request_id = %request.id, "Account request rejected");

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            None,
            action.action_name(),
            "account_request",
            request.id,
            json!({ "reason": reason }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok(Json(json!({ "success": true })))
}

/// POST `/account-requests/{id}/request-info` - Ask the applicant for more
/// information.
async fn request_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RequestInfoBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let message = require_text(body.message, "message")?;

    let repo = AccountRequestRepository::new((*state.db).clone());
    let (request, action) = repo.request_info(id, &message).await.map_err(|e| {
        error!(error = %e, request_id = %id, "Failed to request info");
        ApiError::from(e)
    })?;

    info!(request_id = %request.id, "Additional information requested");

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            None,
            action.action_name(),
            "account_request",
            request.id,
            json!({ "message": message }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok(Json(json!({ "success": true })))
}
