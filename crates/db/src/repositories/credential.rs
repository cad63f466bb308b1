//! Credential repository for the identity store.
//!
//! Credentials are created during user provisioning, before the user
//! profile row exists. A credential with no matching profile is an orphan
//! left behind by a provisioning failure.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::auth_credentials;

/// Credential repository for identity operations.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    db: DatabaseConnection,
}

impl CredentialRepository {
    /// Creates a new credential repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new credential. The returned id keys the user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including when the
    /// email is already registered.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<auth_credentials::Model, DbErr> {
        let credential = auth_credentials::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        credential.insert(&self.db).await
    }

    /// Checks if an email already has a credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = auth_credentials::Entity::find()
            .filter(auth_credentials::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
