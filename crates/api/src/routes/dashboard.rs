//! Dashboard analytics routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::{cash_calls::parse_scope, require};
use cashcall_core::analytics::{AnalyticsSummary, CashCallSnapshot};
use cashcall_db::repositories::CashCallRepository;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/analytics", get(analytics))
}

/// Query parameters for the analytics aggregate.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// The requesting user.
    pub user_id: Option<Uuid>,
    /// Access scope: mine, affiliate, or all (default mine).
    pub scope: Option<String>,
}

/// GET `/dashboard/analytics?user_id=&scope=` - Aggregate over the caller's
/// visible cash calls. Recomputed from scratch on every request.
async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require(query.user_id, "user_id")?;
    let scope = parse_scope(query.scope.as_deref())?;

    let repo = CashCallRepository::new((*state.db).clone());
    let calls = repo.list_scoped(user_id, scope).await.map_err(|e| {
        error!(error = %e, "Failed to fetch cash calls for analytics");
        ApiError::from(e)
    })?;

    let snapshots: Vec<CashCallSnapshot> = calls
        .into_iter()
        .map(|call| CashCallSnapshot {
            amount_requested: call.amount_requested,
            status: call.status.to_core(),
            created_at: call.created_at.with_timezone(&Utc),
            approved_at: call.approved_at.map(|t| t.with_timezone(&Utc)),
        })
        .collect();

    Ok(Json(AnalyticsSummary::compute(&snapshots)))
}
