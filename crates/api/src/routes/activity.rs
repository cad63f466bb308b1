//! Audit-trail routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use cashcall_db::repositories::{ActivityLogFilter, ActivityLogRepository};

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 200;

/// Creates the activity-log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/activity-logs", get(list_activity_logs))
}

/// Query parameters for listing activity logs.
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    /// Filter by resource type.
    pub resource_type: Option<String>,
    /// Filter by resource id.
    pub resource_id: Option<Uuid>,
    /// Maximum number of entries (default 50, capped at 200).
    pub limit: Option<u64>,
}

/// GET `/activity-logs` - List audit entries, newest first.
async fn list_activity_logs(
    State(state): State<AppState>,
    Query(query): Query<ListActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let repo = ActivityLogRepository::new((*state.db).clone());
    let entries = repo
        .list(
            ActivityLogFilter {
                resource_type: query.resource_type,
                resource_id: query.resource_id,
            },
            limit,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list activity logs");
            ApiError::from(e)
        })?;

    Ok(Json(entries))
}
