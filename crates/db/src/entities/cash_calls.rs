//! `SeaORM` Entity for the cash_calls table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CallPriority, CashCallStatus, ComplianceStatus};

/// Cash call row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_calls")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-assigned call number, unique system-wide.
    pub call_number: String,
    /// Affiliate company this call funds.
    pub affiliate_id: Uuid,
    /// Requested amount in the call currency.
    pub amount_requested: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Exchange rate to the reporting currency at creation time.
    pub exchange_rate: Decimal,
    /// Workflow status.
    pub status: CashCallStatus,
    /// Requester-assigned priority.
    pub priority: CallPriority,
    /// Compliance review outcome.
    pub compliance_status: ComplianceStatus,
    /// Free-text description.
    pub description: Option<String>,
    /// Business justification.
    pub justification: Option<String>,
    /// Attachment metadata (JSON array).
    pub attachments: Json,
    /// The user who created the call.
    pub created_by: Uuid,
    /// The admin-assigned reviewer, if any. Must reference an active user.
    pub assignee_user_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
    /// Approval timestamp, once approved.
    pub approved_at: Option<DateTimeWithTimeZone>,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The affiliate this call belongs to.
    #[sea_orm(
        belongs_to = "super::affiliates::Entity",
        from = "Column::AffiliateId",
        to = "super::affiliates::Column::Id"
    )]
    Affiliates,
    /// The creating user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::affiliates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Affiliates.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
