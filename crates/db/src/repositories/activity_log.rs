//! Activity-log repository for the append-only audit trail.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::activity_logs;

/// Filter options for listing activity logs.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    /// Filter by resource type.
    pub resource_type: Option<String>,
    /// Filter by resource id.
    pub resource_id: Option<Uuid>,
}

/// Activity-log repository.
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    db: DatabaseConnection,
}

impl ActivityLogRepository {
    /// Creates a new activity-log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an audit entry.
    ///
    /// `user_id` is absent for unauthenticated actions such as public
    /// account-request submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        action: &str,
        resource_type: &str,
        resource_id: Uuid,
        details: serde_json::Value,
    ) -> Result<activity_logs::Model, DbErr> {
        let entry = activity_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            action: Set(action.to_string()),
            resource_type: Set(resource_type.to_string()),
            resource_id: Set(resource_id),
            details: Set(details),
            created_at: Set(chrono::Utc::now().into()),
        };

        entry.insert(&self.db).await
    }

    /// Lists audit entries, newest first, up to `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: ActivityLogFilter,
        limit: u64,
    ) -> Result<Vec<activity_logs::Model>, DbErr> {
        let mut query = activity_logs::Entity::find();

        if let Some(resource_type) = filter.resource_type {
            query = query.filter(activity_logs::Column::ResourceType.eq(resource_type));
        }
        if let Some(resource_id) = filter.resource_id {
            query = query.filter(activity_logs::Column::ResourceId.eq(resource_id));
        }

        query
            .order_by_desc(activity_logs::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}
