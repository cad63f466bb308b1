//! API route definitions.
//!
//! Callers are identified by ids carried in the request itself; platform
//! authentication sits in front of this service, so there is no auth
//! middleware here.

use axum::Router;

use crate::AppState;
use crate::error::ApiError;

pub mod account_requests;
pub mod activity;
pub mod affiliates;
pub mod cash_calls;
pub mod dashboard;
pub mod health;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(account_requests::routes())
        .merge(users::routes())
        .merge(cash_calls::routes())
        .merge(affiliates::routes())
        .merge(activity::routes())
        .merge(dashboard::routes())
}

/// Unwraps a required field, failing with a validation error naming it.
pub(crate) fn require<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::validation(format!("{name} is required")))
}

/// Unwraps a required text field, rejecting blank values.
pub(crate) fn require_text(field: Option<String>, name: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation(format!("{name} is required"))),
    }
}
