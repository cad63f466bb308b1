//! `SeaORM` Entity for the account_requests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RequestStatus, UserRole};

/// Account access request row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_requests")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    /// Affiliate company the applicant belongs to, if any.
    pub affiliate_company_id: Option<Uuid>,
    /// Why the applicant needs access.
    pub reason_for_access: String,
    /// Approving manager's name.
    pub manager_name: String,
    /// Approving manager's email.
    pub manager_email: String,
    /// Review status.
    pub status: RequestStatus,
    /// Reviewer notes, once reviewed.
    pub review_notes: Option<String>,
    /// Terminal decision timestamp.
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    /// Role assigned at approval.
    pub assigned_role: Option<UserRole>,
    /// Submission timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The applicant's affiliate company.
    #[sea_orm(
        belongs_to = "super::affiliates::Entity",
        from = "Column::AffiliateCompanyId",
        to = "super::affiliates::Column::Id"
    )]
    Affiliates,
}

impl Related<super::affiliates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Affiliates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
