//! User repository for profile database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::UserRole;
use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already has a user profile.
    #[error("Email '{0}' is already registered")]
    EmailExists(String),

    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Update carried no fields to change.
    #[error("No fields to update")]
    EmptyUpdate,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user profile.
///
/// The id is the credential id issued by the identity store, so profile and
/// credential share a key.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// User ID, matching the credential id.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Department.
    pub department: Option<String>,
    /// Job position.
    pub position: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Affiliate company, for affiliate-scoped users.
    pub affiliate_company_id: Option<Uuid>,
}

/// Input for updating a user profile.
///
/// Only the allow-listed fields appear here; name, email, and affiliate
/// membership are fixed at provisioning time.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// Assigned role.
    pub role: Option<UserRole>,
    /// Department.
    pub department: Option<Option<String>>,
    /// Job position.
    pub position: Option<Option<String>>,
    /// Contact phone.
    pub phone: Option<Option<String>>,
    /// Active flag.
    pub is_active: Option<bool>,
}

impl UpdateUserInput {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.phone.is_none()
            && self.is_active.is_none()
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Checks if an email already has a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user profile.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailExists` if the email already has a profile,
    /// or `UserError::Database` if the insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if self.email_exists(&input.email).await? {
            return Err(UserError::EmailExists(input.email));
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(input.id),
            email: Set(input.email),
            full_name: Set(input.full_name),
            role: Set(input.role),
            department: Set(input.department),
            position: Set(input.position),
            phone: Set(input.phone),
            affiliate_company_id: Set(input.affiliate_company_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(user.insert(&self.db).await?)
    }

    /// Lists users, optionally filtered by role, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<users::Model>, DbErr> {
        let mut query = users::Entity::find();
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role));
        }
        query
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Updates allow-listed profile fields.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyUpdate` if no field is set,
    /// `UserError::NotFound` if the user does not exist, or
    /// `UserError::Database` if the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<users::Model, UserError> {
        if input.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(department) = input.department {
            active.department = Set(department);
        }
        if let Some(position) = input.position {
            active.position = Set(position);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}
