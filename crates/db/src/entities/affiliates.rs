//! `SeaORM` Entity for the affiliates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AffiliateStatus, RiskLevel};

/// Affiliate company reference row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliates")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Trading name.
    pub name: String,
    /// Registered legal name.
    pub legal_name: String,
    /// Unique short company code.
    pub company_code: String,
    /// Partner status.
    pub status: AffiliateStatus,
    /// Assessed risk level.
    pub risk_level: RiskLevel,
    /// External financial rating, if assessed.
    pub financial_rating: Option<String>,
    /// City of the head office.
    pub city: Option<String>,
    /// Country of incorporation.
    pub country: Option<String>,
    /// Company website.
    pub website: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Cash calls raised for this affiliate.
    #[sea_orm(has_many = "super::cash_calls::Entity")]
    CashCalls,
}

impl Related<super::cash_calls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CashCalls.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
