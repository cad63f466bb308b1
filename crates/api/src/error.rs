//! Error-to-response mapping.
//!
//! Handlers return `ApiError`, which renders the `{error, message}` JSON
//! body with the status code from the shared taxonomy. Repository errors
//! convert via `From` so handlers can use `?`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;

use cashcall_core::auth::PasswordError;
use cashcall_core::lifecycle::LifecycleError;
use cashcall_db::repositories::{AccountRequestError, CashCallError, UserError};
use cashcall_shared::AppError;

/// Wrapper rendering an `AppError` as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// Shorthand for a missing entity.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidTransition { .. } | LifecycleError::RequestNotPending(_) => {
                Self(AppError::InvalidState(err.to_string()))
            }
            LifecycleError::RejectionReasonRequired | LifecycleError::InfoMessageRequired => {
                Self(AppError::Validation(err.to_string()))
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::AuthProvider(err.to_string()))
    }
}

impl From<CashCallError> for ApiError {
    fn from(err: CashCallError) -> Self {
        match err {
            CashCallError::NotFound(_) | CashCallError::UserNotFound(_) => {
                Self(AppError::NotFound(err.to_string()))
            }
            CashCallError::DuplicateCallNumber(_) => Self(AppError::Conflict(err.to_string())),
            CashCallError::Closed(_) => Self(AppError::InvalidState(err.to_string())),
            CashCallError::AffiliateNotFound(_)
            | CashCallError::AssigneeNotFound(_)
            | CashCallError::AssigneeInactive(_) => Self(AppError::Validation(err.to_string())),
            CashCallError::Lifecycle(e) => e.into(),
            CashCallError::Database(e) => e.into(),
        }
    }
}

impl From<AccountRequestError> for ApiError {
    fn from(err: AccountRequestError) -> Self {
        match err {
            AccountRequestError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            AccountRequestError::DuplicatePending(_) => {
                Self(AppError::Validation(err.to_string()))
            }
            AccountRequestError::Lifecycle(e) => e.into(),
            AccountRequestError::Database(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailExists(_) => Self(AppError::Conflict(err.to_string())),
            UserError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            UserError::EmptyUpdate => Self(AppError::Validation(err.to_string())),
            UserError::Database(e) => e.into(),
        }
    }
}
