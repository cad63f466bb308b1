//! Cash-call routes: creation, scoped listing, assignment, and the
//! status workflow.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::{require, require_text};
use cashcall_core::access::AccessScope;
use cashcall_core::lifecycle::CashCallStatus;
use cashcall_db::entities::sea_orm_active_enums::CallPriority;
use cashcall_db::repositories::{
    ActivityLogRepository, CashCallRepository, CreateCashCallInput, UserRepository,
};

/// Creates the cash-call routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash-calls", post(create_cash_call).get(list_cash_calls))
        .route("/cash-calls/{id}", get(get_cash_call))
        .route("/cash-calls/{id}/status", post(change_status))
        .route("/cash-calls/{id}/assign", patch(assign_cash_call))
}

/// Request body for creating a cash call.
#[derive(Debug, Deserialize)]
pub struct CreateCashCallBody {
    /// Human-assigned call number.
    pub call_number: Option<String>,
    /// Affiliate company this call funds.
    pub affiliate_id: Option<Uuid>,
    /// Requested amount.
    pub amount_requested: Option<Decimal>,
    /// ISO currency code.
    pub currency: Option<String>,
    /// Exchange rate to the reporting currency (default 1).
    pub exchange_rate: Option<Decimal>,
    /// Priority: low, medium, or high (default medium).
    pub priority: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Business justification.
    pub justification: Option<String>,
    /// Attachment metadata.
    pub attachments: Option<serde_json::Value>,
    /// The creating user.
    pub created_by: Option<Uuid>,
}

/// Request body for the status workflow.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusBody {
    /// The target status.
    pub status: Option<String>,
    /// The acting user.
    pub user_id: Option<Uuid>,
    /// Rejection reason (required when rejecting).
    pub reason: Option<String>,
    /// Reviewer notes (approval only).
    pub notes: Option<String>,
}

/// Request body for assigning a reviewer.
#[derive(Debug, Deserialize)]
pub struct AssignBody {
    /// The reviewer to assign; absent clears the assignment.
    pub assignee_user_id: Option<Uuid>,
    /// The admin performing the assignment.
    pub admin_user_id: Option<Uuid>,
}

/// Query parameters for the scoped listing.
#[derive(Debug, Deserialize)]
pub struct ListCashCallsQuery {
    /// The requesting user.
    pub user_id: Option<Uuid>,
    /// Access scope: mine, affiliate, or all (default mine).
    pub scope: Option<String>,
}

pub(crate) fn parse_scope(scope: Option<&str>) -> Result<AccessScope, ApiError> {
    match scope {
        None => Ok(AccessScope::Mine),
        Some(s) => AccessScope::parse(s)
            .ok_or_else(|| ApiError::validation(format!("Unrecognized scope '{s}'"))),
    }
}

fn parse_priority(priority: Option<&str>) -> Result<CallPriority, ApiError> {
    match priority {
        None => Ok(CallPriority::Medium),
        Some(p) => match p.to_lowercase().as_str() {
            "low" => Ok(CallPriority::Low),
            "medium" => Ok(CallPriority::Medium),
            "high" => Ok(CallPriority::High),
            _ => Err(ApiError::validation(format!(
                "Unrecognized priority '{p}'"
            ))),
        },
    }
}

fn parse_currency(raw: &str) -> Result<String, ApiError> {
    let code = raw.trim().to_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(ApiError::validation(format!(
            "Invalid currency code '{raw}'; expected a three-letter ISO code"
        )))
    }
}

fn forbidden(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "forbidden", "message": message })),
    )
        .into_response()
}

/// POST `/cash-calls` - Create a draft cash call.
async fn create_cash_call(
    State(state): State<AppState>,
    Json(body): Json<CreateCashCallBody>,
) -> Result<impl IntoResponse, ApiError> {
    let amount_requested = require(body.amount_requested, "amount_requested")?;
    if amount_requested <= Decimal::ZERO {
        return Err(ApiError::validation("amount_requested must be positive"));
    }

    let input = CreateCashCallInput {
        call_number: require_text(body.call_number, "call_number")?,
        affiliate_id: require(body.affiliate_id, "affiliate_id")?,
        amount_requested,
        currency: parse_currency(&require_text(body.currency, "currency")?)?,
        exchange_rate: body.exchange_rate.unwrap_or(Decimal::ONE),
        priority: parse_priority(body.priority.as_deref())?,
        description: body.description,
        justification: body.justification,
        attachments: body.attachments.unwrap_or_else(|| json!([])),
        created_by: require(body.created_by, "created_by")?,
    };
    let created_by = input.created_by;

    let repo = CashCallRepository::new((*state.db).clone());
    let call = repo.create(input).await.map_err(|e| {
        error!(error = %e, "Failed to create cash call");
        ApiError::from(e)
    })?;

    info!(cash_call_id = %call.id, call_number = %call.call_number, "Cash call created");

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            Some(created_by),
            "cash_call_created",
            "cash_call",
            call.id,
            json!({ "call_number": call.call_number }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok((StatusCode::CREATED, Json(call)))
}

/// GET `/cash-calls?user_id=&scope=` - Scoped listing, newest first.
async fn list_cash_calls(
    State(state): State<AppState>,
    Query(query): Query<ListCashCallsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require(query.user_id, "user_id")?;
    let scope = parse_scope(query.scope.as_deref())?;

    let repo = CashCallRepository::new((*state.db).clone());
    let calls = repo.list_scoped(user_id, scope).await.map_err(|e| {
        error!(error = %e, "Failed to list cash calls");
        ApiError::from(e)
    })?;

    Ok(Json(calls))
}

/// GET `/cash-calls/{id}` - Single cash call.
async fn get_cash_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CashCallRepository::new((*state.db).clone());
    let call = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Cash call not found: {id}")))?;

    Ok(Json(call))
}

/// POST `/cash-calls/{id}/status` - Run one workflow transition.
///
/// The target status selects the action; review actions additionally require
/// a reviewer role on the acting user.
async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeStatusBody>,
) -> Result<Response, ApiError> {
    let target = require_text(body.status, "status")?;
    let user_id = require(body.user_id, "user_id")?;

    let Some(target) = CashCallStatus::parse(&target) else {
        return Err(ApiError::validation(format!(
            "Unrecognized status '{target}'"
        )));
    };

    let users = UserRepository::new((*state.db).clone());
    let actor = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {user_id}")))?;

    let repo = CashCallRepository::new((*state.db).clone());
    let (call, action) = match target {
        CashCallStatus::UnderReview => repo.submit(id, user_id).await?,
        CashCallStatus::Approved => {
            if !actor.role.to_core().can_review_cash_calls() {
                return Ok(forbidden("Role may not approve cash calls"));
            }
            repo.approve(id, user_id, body.notes.clone()).await?
        }
        CashCallStatus::Rejected => {
            if !actor.role.to_core().can_review_cash_calls() {
                return Ok(forbidden("Role may not reject cash calls"));
            }
            let reason = require_text(body.reason.clone(), "reason")?;
            repo.reject(id, user_id, reason).await?
        }
        CashCallStatus::Paid => {
            if !actor.role.to_core().can_review_cash_calls() {
                return Ok(forbidden("Role may not mark cash calls paid"));
            }
            repo.mark_paid(id, user_id).await?
        }
        CashCallStatus::Draft => {
            return Err(ApiError::validation(
                "A cash call cannot be moved back to draft",
            ));
        }
    };

    info!(
        cash_call_id = %call.id,
        status = call.status.to_core().as_str(),
        "Cash call status changed"
    );

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            Some(user_id),
            action.action_name(),
            "cash_call",
            call.id,
            json!({ "notes": body.notes, "reason": body.reason }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok(Json(call).into_response())
}

/// PATCH `/cash-calls/{id}/assign` - Assign or clear the reviewer.
async fn assign_cash_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignBody>,
) -> Result<Response, ApiError> {
    let admin_user_id = require(body.admin_user_id, "admin_user_id")?;

    let users = UserRepository::new((*state.db).clone());
    let admin = users
        .find_by_id(admin_user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {admin_user_id}")))?;
    if !admin.role.to_core().is_admin() {
        return Ok(forbidden("Only admins may assign cash calls"));
    }

    let repo = CashCallRepository::new((*state.db).clone());
    let call = repo.assign(id, body.assignee_user_id).await.map_err(|e| {
        error!(error = %e, cash_call_id = %id, "Failed to assign cash call");
        ApiError::from(e)
    })?;

    info!(cash_call_id = %call.id, "Cash call assignment updated");

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            Some(admin_user_id),
            "cash_call_assigned",
            "cash_call",
            call.id,
            json!({ "assignee_user_id": body.assignee_user_id }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    Ok(Json(call).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, AccessScope::Mine)]
    #[case(Some("mine"), AccessScope::Mine)]
    #[case(Some("AFFILIATE"), AccessScope::Affiliate)]
    #[case(Some("all"), AccessScope::All)]
    fn test_parse_scope_accepts(#[case] input: Option<&str>, #[case] expected: AccessScope) {
        assert_eq!(parse_scope(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_scope_rejects_unknown() {
        let err = parse_scope(Some("everyone")).unwrap_err();
        assert_eq!(err.0.error_code(), "validation_error");
    }

    #[rstest]
    #[case(None, CallPriority::Medium)]
    #[case(Some("low"), CallPriority::Low)]
    #[case(Some("HIGH"), CallPriority::High)]
    fn test_parse_priority(#[case] input: Option<&str>, #[case] expected: CallPriority) {
        assert_eq!(parse_priority(input).unwrap(), expected);
    }

    #[rstest]
    #[case("USD", "USD")]
    #[case("eur", "EUR")]
    #[case(" gbp ", "GBP")]
    fn test_parse_currency_normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_currency(input).unwrap(), expected);
    }

    #[rstest]
    #[case("US")]
    #[case("DOLLARS")]
    #[case("U$D")]
    #[case("ÐKK")]
    fn test_parse_currency_rejects_non_iso(#[case] input: &str) {
        let err = parse_currency(input).unwrap_err();
        assert_eq!(err.0.error_code(), "validation_error");
    }

    #[test]
    fn test_parse_priority_rejects_unknown() {
        assert!(parse_priority(Some("urgent")).is_err());
    }
}
