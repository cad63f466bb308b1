//! Account-request repository for intake and review operations.

use cashcall_core::lifecycle::{AccountRequestReview, LifecycleError, ReviewAction};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{RequestStatus, UserRole};
use crate::entities::{account_requests, affiliates};

/// Error types for account-request operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountRequestError {
    /// Request not found.
    #[error("Account request not found: {0}")]
    NotFound(Uuid),

    /// The email already has a pending request.
    #[error("A pending request already exists for '{0}'")]
    DuplicatePending(String),

    /// The review decision was invalid for the request's current status.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account request.
#[derive(Debug, Clone)]
pub struct CreateAccountRequestInput {
    /// Applicant email.
    pub email: String,
    /// Applicant full name.
    pub full_name: String,
    /// Applicant job position.
    pub position: String,
    /// Applicant department.
    pub department: String,
    /// Applicant contact phone.
    pub phone: String,
    /// Affiliate company, if any.
    pub affiliate_company_id: Option<Uuid>,
    /// Why the applicant needs access.
    pub reason_for_access: String,
    /// Approving manager's name.
    pub manager_name: String,
    /// Approving manager's email.
    pub manager_email: String,
}

/// Account request joined with its affiliate name for listings.
#[derive(Debug, Clone)]
pub struct AccountRequestWithAffiliate {
    /// The request record.
    pub request: account_requests::Model,
    /// The affiliate company name, when the request names one.
    pub affiliate_name: Option<String>,
}

/// Account-request repository.
#[derive(Debug, Clone)]
pub struct AccountRequestRepository {
    db: DatabaseConnection,
}

impl AccountRequestRepository {
    /// Creates a new account-request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending account request.
    ///
    /// # Errors
    ///
    /// Returns `AccountRequestError::DuplicatePending` if the email already
    /// has a pending request, or `AccountRequestError::Database` if the
    /// insert fails.
    pub async fn create(
        &self,
        input: CreateAccountRequestInput,
    ) -> Result<account_requests::Model, AccountRequestError> {
        if self.pending_exists_for_email(&input.email).await? {
            return Err(AccountRequestError::DuplicatePending(input.email));
        }

        let request = account_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            full_name: Set(input.full_name),
            position: Set(input.position),
            department: Set(input.department),
            phone: Set(input.phone),
            affiliate_company_id: Set(input.affiliate_company_id),
            reason_for_access: Set(input.reason_for_access),
            manager_name: Set(input.manager_name),
            manager_email: Set(input.manager_email),
            status: Set(RequestStatus::Pending),
            review_notes: Set(None),
            reviewed_at: Set(None),
            assigned_role: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(request.insert(&self.db).await?)
    }

    /// Checks if an email has a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending_exists_for_email(&self, email: &str) -> Result<bool, DbErr> {
        let count = account_requests::Entity::find()
            .filter(account_requests::Column::Email.eq(email))
            .filter(account_requests::Column::Status.eq(RequestStatus::Pending))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Finds a request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<account_requests::Model>, DbErr> {
        account_requests::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all requests with their affiliate names, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<AccountRequestWithAffiliate>, DbErr> {
        let rows = account_requests::Entity::find()
            .find_also_related(affiliates::Entity)
            .order_by_desc(account_requests::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(request, affiliate)| AccountRequestWithAffiliate {
                request,
                affiliate_name: affiliate.map(|a| a.name),
            })
            .collect())
    }

    /// Rejects a pending request.
    ///
    /// # Errors
    ///
    /// Returns `AccountRequestError::NotFound` if the request does not
    /// exist, `AccountRequestError::Lifecycle` if the request already left
    /// pending or the reason is empty, or `AccountRequestError::Database`
    /// if the update fails.
    pub async fn reject(
        &self,
        id: Uuid,
        reason: &str,
        notes: Option<String>,
    ) -> Result<(account_requests::Model, ReviewAction), AccountRequestError> {
        let request = self
            .find_by_id(id)
            .await?
            .ok_or(AccountRequestError::NotFound(id))?;

        let action = AccountRequestReview::reject(request.status.to_core(), reason, notes)?;
        let updated = self.persist_review(request, &action).await?;
        Ok((updated, action))
    }

    /// Asks the applicant of a pending request for more information.
    ///
    /// # Errors
    ///
    /// Returns `AccountRequestError::NotFound` if the request does not
    /// exist, `AccountRequestError::Lifecycle` if the request already left
    /// pending or the message is empty, or `AccountRequestError::Database`
    /// if the update fails.
    pub async fn request_info(
        &self,
        id: Uuid,
        message: &str,
    ) -> Result<(account_requests::Model, ReviewAction), AccountRequestError> {
        let request = self
            .find_by_id(id)
            .await?
            .ok_or(AccountRequestError::NotFound(id))?;

        let action = AccountRequestReview::request_info(request.status.to_core(), message)?;
        let updated = self.persist_review(request, &action).await?;
        Ok((updated, action))
    }

    /// Persists an already-validated review decision.
    ///
    /// User provisioning validates approval before side effects and applies
    /// the decision afterwards, so this takes the action rather than
    /// re-deriving it.
    ///
    /// # Errors
    ///
    /// Returns `AccountRequestError::NotFound` if the request does not
    /// exist, or `AccountRequestError::Database` if the update fails.
    pub async fn apply_review(
        &self,
        id: Uuid,
        action: &ReviewAction,
    ) -> Result<account_requests::Model, AccountRequestError> {
        let request = self
            .find_by_id(id)
            .await?
            .ok_or(AccountRequestError::NotFound(id))?;

        Ok(self.persist_review(request, action).await?)
    }

    async fn persist_review(
        &self,
        request: account_requests::Model,
        action: &ReviewAction,
    ) -> Result<account_requests::Model, DbErr> {
        let mut active: account_requests::ActiveModel = request.into();
        active.status = Set(RequestStatus::from_core(action.new_status()));

        match action {
            ReviewAction::Reject {
                review_notes,
                reviewed_at,
                ..
            } => {
                active.review_notes = Set(Some(review_notes.clone()));
                active.reviewed_at = Set(Some((*reviewed_at).into()));
            }
            ReviewAction::RequestInfo { review_notes, .. } => {
                active.review_notes = Set(Some(review_notes.clone()));
            }
            ReviewAction::Approve {
                assigned_role,
                review_notes,
                reviewed_at,
                ..
            } => {
                active.assigned_role = Set(Some(UserRole::from_core(*assigned_role)));
                active.review_notes = Set(Some(review_notes.clone()));
                active.reviewed_at = Set(Some((*reviewed_at).into()));
            }
        }

        active.update(&self.db).await
    }
}
