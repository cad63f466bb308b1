//! Cash-call repository for lifecycle and query operations.
//!
//! Status changes go through the workflow state machine in core before
//! anything is written, so an illegal transition never reaches the
//! database.

use cashcall_core::access::AccessScope;
use cashcall_core::lifecycle::{CashCallAction, CashCallWorkflow, LifecycleError};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{CallPriority, CashCallStatus, ComplianceStatus};
use crate::entities::{affiliates, cash_calls, users};

/// Error types for cash-call operations.
#[derive(Debug, thiserror::Error)]
pub enum CashCallError {
    /// Cash call not found.
    #[error("Cash call not found: {0}")]
    NotFound(Uuid),

    /// Call number already in use.
    #[error("Call number '{0}' already exists")]
    DuplicateCallNumber(String),

    /// Affiliate not found.
    #[error("Affiliate not found: {0}")]
    AffiliateNotFound(Uuid),

    /// Assignee user not found.
    #[error("Assignee not found: {0}")]
    AssigneeNotFound(Uuid),

    /// Assignee user is deactivated.
    #[error("Assignee is not active: {0}")]
    AssigneeInactive(Uuid),

    /// The cash call has reached a terminal status.
    #[error("Cash call is closed: {0}")]
    Closed(Uuid),

    /// Requesting user not found (scoped listing).
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// The requested status change is not a legal transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a cash call.
#[derive(Debug, Clone)]
pub struct CreateCashCallInput {
    /// Human-assigned call number, unique system-wide.
    pub call_number: String,
    /// Affiliate company this call funds.
    pub affiliate_id: Uuid,
    /// Requested amount.
    pub amount_requested: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Exchange rate to the reporting currency.
    pub exchange_rate: Decimal,
    /// Priority.
    pub priority: CallPriority,
    /// Free-text description.
    pub description: Option<String>,
    /// Business justification.
    pub justification: Option<String>,
    /// Attachment metadata.
    pub attachments: serde_json::Value,
    /// The creating user.
    pub created_by: Uuid,
}

/// Cash-call repository.
#[derive(Debug, Clone)]
pub struct CashCallRepository {
    db: DatabaseConnection,
}

impl CashCallRepository {
    /// Creates a new cash-call repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a cash call in draft status.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::DuplicateCallNumber` if the call number is
    /// taken, `CashCallError::AffiliateNotFound` if the affiliate does not
    /// exist, or `CashCallError::Database` if the insert fails.
    pub async fn create(
        &self,
        input: CreateCashCallInput,
    ) -> Result<cash_calls::Model, CashCallError> {
        let affiliate_count = affiliates::Entity::find_by_id(input.affiliate_id)
            .count(&self.db)
            .await?;
        if affiliate_count == 0 {
            return Err(CashCallError::AffiliateNotFound(input.affiliate_id));
        }

        let taken = cash_calls::Entity::find()
            .filter(cash_calls::Column::CallNumber.eq(input.call_number.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(CashCallError::DuplicateCallNumber(input.call_number));
        }

        let now = chrono::Utc::now().into();
        let call = cash_calls::ActiveModel {
            id: Set(Uuid::new_v4()),
            call_number: Set(input.call_number),
            affiliate_id: Set(input.affiliate_id),
            amount_requested: Set(input.amount_requested),
            currency: Set(input.currency),
            exchange_rate: Set(input.exchange_rate),
            status: Set(CashCallStatus::Draft),
            priority: Set(input.priority),
            compliance_status: Set(ComplianceStatus::Pending),
            description: Set(input.description),
            justification: Set(input.justification),
            attachments: Set(input.attachments),
            created_by: Set(input.created_by),
            assignee_user_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            approved_at: Set(None),
        };

        Ok(call.insert(&self.db).await?)
    }

    /// Finds a cash call by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<cash_calls::Model>, DbErr> {
        cash_calls::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists cash calls visible to a user under a scope, newest first.
    ///
    /// `Mine` filters on creator, `Affiliate` on the user's affiliate
    /// company, `All` returns everything. A user with the affiliate scope
    /// but no affiliate company on their profile sees nothing.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::UserNotFound` if an affiliate-scoped lookup
    /// names a missing user, or `CashCallError::Database` if the query
    /// fails.
    pub async fn list_scoped(
        &self,
        user_id: Uuid,
        scope: AccessScope,
    ) -> Result<Vec<cash_calls::Model>, CashCallError> {
        let mut query = cash_calls::Entity::find();

        match scope {
            AccessScope::Mine => {
                query = query.filter(cash_calls::Column::CreatedBy.eq(user_id));
            }
            AccessScope::Affiliate => {
                let user = users::Entity::find_by_id(user_id)
                    .one(&self.db)
                    .await?
                    .ok_or(CashCallError::UserNotFound(user_id))?;
                let Some(affiliate_id) = user.affiliate_company_id else {
                    return Ok(Vec::new());
                };
                query = query.filter(cash_calls::Column::AffiliateId.eq(affiliate_id));
            }
            AccessScope::All => {}
        }

        Ok(query
            .order_by_desc(cash_calls::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Assigns or clears the reviewer on a cash call.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::NotFound` if the cash call does not exist,
    /// `CashCallError::Closed` if it is rejected or paid,
    /// `CashCallError::AssigneeNotFound` or `CashCallError::AssigneeInactive`
    /// if the assignee is invalid, or `CashCallError::Database` if the
    /// update fails.
    pub async fn assign(
        &self,
        id: Uuid,
        assignee_user_id: Option<Uuid>,
    ) -> Result<cash_calls::Model, CashCallError> {
        let call = self
            .find_by_id(id)
            .await?
            .ok_or(CashCallError::NotFound(id))?;

        if call.status.to_core().is_terminal() {
            return Err(CashCallError::Closed(id));
        }

        if let Some(assignee_id) = assignee_user_id {
            let assignee = users::Entity::find_by_id(assignee_id)
                .one(&self.db)
                .await?
                .ok_or(CashCallError::AssigneeNotFound(assignee_id))?;
            if !assignee.is_active {
                return Err(CashCallError::AssigneeInactive(assignee_id));
            }
        }

        let mut active: cash_calls::ActiveModel = call.into();
        active.assignee_user_id = Set(assignee_user_id);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Submits a draft cash call for review.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::NotFound` if the cash call does not exist,
    /// `CashCallError::Lifecycle` if it is not in draft, or
    /// `CashCallError::Database` if the update fails.
    pub async fn submit(
        &self,
        id: Uuid,
        submitted_by: Uuid,
    ) -> Result<(cash_calls::Model, CashCallAction), CashCallError> {
        let call = self
            .find_by_id(id)
            .await?
            .ok_or(CashCallError::NotFound(id))?;

        let action = CashCallWorkflow::submit(call.status.to_core(), submitted_by)?;
        let updated = self.persist_action(call, &action).await?;
        Ok((updated, action))
    }

    /// Approves a cash call under review.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::NotFound` if the cash call does not exist,
    /// `CashCallError::Lifecycle` if it is not under review, or
    /// `CashCallError::Database` if the update fails.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        notes: Option<String>,
    ) -> Result<(cash_calls::Model, CashCallAction), CashCallError> {
        let call = self
            .find_by_id(id)
            .await?
            .ok_or(CashCallError::NotFound(id))?;

        let action = CashCallWorkflow::approve(call.status.to_core(), approved_by, notes)?;
        let updated = self.persist_action(call, &action).await?;
        Ok((updated, action))
    }

    /// Rejects a cash call under review.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::NotFound` if the cash call does not exist,
    /// `CashCallError::Lifecycle` if it is not under review or the reason
    /// is empty, or `CashCallError::Database` if the update fails.
    pub async fn reject(
        &self,
        id: Uuid,
        rejected_by: Uuid,
        rejection_reason: String,
    ) -> Result<(cash_calls::Model, CashCallAction), CashCallError> {
        let call = self
            .find_by_id(id)
            .await?
            .ok_or(CashCallError::NotFound(id))?;

        let action =
            CashCallWorkflow::reject(call.status.to_core(), rejected_by, rejection_reason)?;
        let updated = self.persist_action(call, &action).await?;
        Ok((updated, action))
    }

    /// Marks an approved cash call as paid.
    ///
    /// # Errors
    ///
    /// Returns `CashCallError::NotFound` if the cash call does not exist,
    /// `CashCallError::Lifecycle` if it is not approved, or
    /// `CashCallError::Database` if the update fails.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        paid_by: Uuid,
    ) -> Result<(cash_calls::Model, CashCallAction), CashCallError> {
        let call = self
            .find_by_id(id)
            .await?
            .ok_or(CashCallError::NotFound(id))?;

        let action = CashCallWorkflow::mark_paid(call.status.to_core(), paid_by)?;
        let updated = self.persist_action(call, &action).await?;
        Ok((updated, action))
    }

    async fn persist_action(
        &self,
        call: cash_calls::Model,
        action: &CashCallAction,
    ) -> Result<cash_calls::Model, DbErr> {
        let mut active: cash_calls::ActiveModel = call.into();
        active.status = Set(CashCallStatus::from_core(action.new_status()));
        active.updated_at = Set(chrono::Utc::now().into());

        if let CashCallAction::Approve { approved_at, .. } = action {
            active.approved_at = Set(Some((*approved_at).into()));
        }

        active.update(&self.db).await
    }
}
