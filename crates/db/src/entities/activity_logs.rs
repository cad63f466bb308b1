//! `SeaORM` Entity for the activity_logs table.
//!
//! Append-only audit trail. Rows are written alongside every state-changing
//! operation and never mutated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Acting user, when known (public submissions have none).
    pub user_id: Option<Uuid>,
    /// Action name, e.g. `cash_call_approved`.
    pub action: String,
    /// Kind of entity acted on.
    pub resource_type: String,
    /// Id of the entity acted on.
    pub resource_id: Uuid,
    /// Structured action details.
    pub details: Json,
    /// Write timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The acting user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
