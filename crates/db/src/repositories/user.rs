//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use bursary_core::access::Role;

use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Username already taken.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login name, unique.
    pub username: String,
    /// Argon2 hash of the password.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Role deciding the user's capabilities.
    pub role: Role,
}

/// User repository for account management and login lookups.
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

    /// Finds an active user by username, for login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UsernameTaken` if the username exists, or a
    /// database error.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let taken = users::Entity::find()
            .filter(users::Column::Username.eq(input.username.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(UserError::UsernameTaken(input.username));
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            password_hash: Set(input.password_hash),
            full_name: Set(input.full_name),
            role: Set(input.role.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(user.insert(&self.db).await?)
    }

    /// Replaces a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if no user has this ID, or a
    /// database error.
    pub async fn update_password(&self, id: Uuid, password_hash: String) -> Result<(), UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
