//! Affiliate repository for partner-company reference data.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::entities::affiliates;

/// Affiliate repository for read operations.
#[derive(Debug, Clone)]
pub struct AffiliateRepository {
    db: DatabaseConnection,
}

impl AffiliateRepository {
    /// Creates a new affiliate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all affiliates ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<affiliates::Model>, DbErr> {
        affiliates::Entity::find()
            .order_by_asc(affiliates::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds an affiliate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<affiliates::Model>, DbErr> {
        affiliates::Entity::find_by_id(id).one(&self.db).await
    }
}
