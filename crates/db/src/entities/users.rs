//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::UserRole;

/// User profile row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key; equals the auth credential id for provisioned users.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Department, if known.
    pub department: Option<String>,
    /// Job position, if known.
    pub position: Option<String>,
    /// Contact phone, if known.
    pub phone: Option<String>,
    /// Affiliate company for affiliate-role users.
    pub affiliate_company_id: Option<Uuid>,
    /// Whether the account may sign in and be assigned work.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The affiliate company this user belongs to.
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
