//! User management routes, including request-to-user provisioning.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::{require, require_text};
use cashcall_core::auth::hash_password;
use cashcall_core::lifecycle::AccountRequestReview;
use cashcall_core::role::UserRole as CoreUserRole;
use cashcall_db::entities::sea_orm_active_enums::UserRole;
use cashcall_db::repositories::{
    AccountRequestRepository, ActivityLogRepository, CreateUserInput, CredentialRepository,
    UpdateUserInput, UserRepository,
};
use cashcall_shared::AppError;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/create", post(provision_user))
        .route("/users/{id}", patch(update_user))
}

/// Request body for provisioning a user from an approved account request.
#[derive(Debug, Deserialize)]
pub struct ProvisionUserBody {
    /// The account request to approve.
    pub request_id: Option<Uuid>,
    /// The role to assign.
    pub role: Option<String>,
    /// Affiliate company for affiliate-scoped users.
    pub affiliate_company_id: Option<Uuid>,
    /// Optional review notes recorded on the request.
    pub notes: Option<String>,
    /// Whether to send the welcome email (default true).
    pub send_welcome_email: Option<bool>,
    /// Temporary password for the new credential.
    pub temporary_password: Option<String>,
}

/// Request body for creating a user directly.
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    /// Login email.
    pub email: Option<String>,
    /// Full name.
    pub full_name: Option<String>,
    /// Role to assign.
    pub role: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job position.
    pub position: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Affiliate company.
    pub affiliate_company_id: Option<Uuid>,
}

/// Request body for updating a user. Only the listed fields can change;
/// name, email, and affiliate membership are fixed at provisioning time.
#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    /// Role to assign.
    pub role: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job position.
    pub position: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Active flag.
    pub is_active: Option<bool>,
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Role to filter by (required).
    pub role: Option<String>,
}

fn parse_role(role: &str) -> Result<CoreUserRole, ApiError> {
    CoreUserRole::parse(role)
        .ok_or_else(|| ApiError::validation(format!("Unrecognized role '{role}'")))
}

/// POST `/users/create` - Provision a user from a pending account request.
///
/// Credential creation, profile creation, and the request update run as a
/// sequence without a distributed transaction: a credential whose profile
/// insert fails stays behind as an orphan and is only logged.
async fn provision_user(
    State(state): State<AppState>,
    Json(body): Json<ProvisionUserBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request_id = require(body.request_id, "request_id")?;
    let role = parse_role(&require_text(body.role, "role")?)?;
    let temporary_password = require_text(body.temporary_password, "temporary_password")?;

    let requests = AccountRequestRepository::new((*state.db).clone());
    let request = requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Account request not found: {request_id}")))?;

    // Validate the approval before any side effects
    let action = AccountRequestReview::approve(request.status.to_core(), role, body.notes)?;

    let password_hash = hash_password(&temporary_password)?;

    let credentials = CredentialRepository::new((*state.db).clone());
    let credential = credentials
        .create(&request.email, &password_hash)
        .await
        .map_err(|e| {
            error!(error = %e, request_id = %request_id, "Failed to create credential");
            ApiError(AppError::AuthProvider(e.to_string()))
        })?;

    let users = UserRepository::new((*state.db).clone());
    let user = users
        .create(CreateUserInput {
            id: credential.id,
            email: request.email.clone(),
            full_name: request.full_name.clone(),
            role: UserRole::from_core(role),
            department: Some(request.department.clone()),
            position: Some(request.position.clone()),
            phone: Some(request.phone.clone()),
            affiliate_company_id: body.affiliate_company_id,
        })
        .await
        .map_err(|e| {
            // The credential cannot be rolled back from here
            error!(
                error = %e,
                credential_id = %credential.id,
                "Failed to create user profile; credential left orphaned"
            );
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, request_id = %request_id, "User provisioned");

    // Secondary effects: never fail the request from here on
    if let Err(e) = requests.apply_review(request_id, &action).await {
        error!(error = %e, request_id = %request_id, "Failed to mark request approved");
    }

    let logs = ActivityLogRepository::new((*state.db).clone());
    if let Err(e) = logs
        .record(
            Some(user.id),
            "account_created",
            "user",
            user.id,
            json!({
                "role": role.as_str(),
                "affiliate_company_id": body.affiliate_company_id,
                "request_id": request_id,
            }),
        )
        .await
    {
        error!(error = %e, "Failed to write activity log");
    }

    if body.send_welcome_email.unwrap_or(true) {
        if let Err(e) = state
            .email_service
            .send_welcome_email(&user.email, &user.full_name)
            .await
        {
            warn!(error = %e, user_id = %user.id, "Failed to send welcome email");
        }
    }

    Ok(Json(json!({
        "success": true,
        "user_id": user.id,
        "email": user.email,
    })))
}

/// GET `/users?role=` - List users with a given role.
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&require_text(query.role, "role")?)?;

    let users = UserRepository::new((*state.db).clone());
    let listed = users.list(Some(UserRole::from_core(role))).await.map_err(|e| {
        error!(error = %e, "Failed to list users");
        ApiError::from(e)
    })?;

    Ok(Json(listed))
}

/// POST `/users` - Create a user directly (admin path, no account request).
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&require_text(body.role, "role")?)?;
    let email = require_text(body.email, "email")?;
    let full_name = require_text(body.full_name, "full_name")?;

    let users = UserRepository::new((*state.db).clone());
    let user = users
        .create(CreateUserInput {
            id: Uuid::new_v4(),
            email,
            full_name,
            role: UserRole::from_core(role),
            department: body.department,
            position: body.position,
            phone: body.phone,
            affiliate_company_id: body.affiliate_company_id,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create user");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH `/users/{id}` - Update allow-listed profile fields.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserBody>,
) -> Result<impl IntoResponse, ApiError> {
    let role = body.role.as_deref().map(parse_role).transpose()?;

    let input = UpdateUserInput {
        role: role.map(UserRole::from_core),
        department: body.department.map(Some),
        position: body.position.map(Some),
        phone: body.phone.map(Some),
        is_active: body.is_active,
    };

    let users = UserRepository::new((*state.db).clone());
    let user = users.update(id, input).await.map_err(|e| {
        error!(error = %e, user_id = %id, "Failed to update user");
        ApiError::from(e)
    })?;

    info!(user_id = %user.id, "User updated");

    Ok(Json(user))
}
