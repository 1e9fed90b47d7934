use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence.
///
/// Defines the data access interface for the registration pipeline.
/// Implementations can use different storage backends; tests use the
/// generated mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn insert(&self, user: User) -> UserResult<User>;

    /// List all users, newest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID; returns false when no record matched
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check whether a user with this email exists
    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// Check whether a user with this phone number exists
    async fn phone_exists(&self, phone: &str) -> UserResult<bool>;
}
