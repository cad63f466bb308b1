//! Affiliate reference-data routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use tracing::error;

use crate::AppState;
use crate::error::ApiError;
use cashcall_db::repositories::AffiliateRepository;

/// Creates the affiliate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/affiliates", get(list_affiliates))
}

/// GET `/affiliates` - List all affiliates ordered by name.
async fn list_affiliates(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = AffiliateRepository::new((*state.db).clone());
    let affiliates = repo.list().await.map_err(|e| {
        error!(error = %e, "Failed to list affiliates");
        ApiError::from(e)
    })?;

    Ok(Json(affiliates))
}
