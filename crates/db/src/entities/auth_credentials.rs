//! `SeaORM` Entity for the auth_credentials table.
//!
//! Stand-in for the external identity provider: one row per issued
//! identity. A user profile is keyed by its credential id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Authentication identity row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_credentials")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
