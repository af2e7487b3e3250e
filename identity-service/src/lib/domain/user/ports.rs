use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persistence operations for the user aggregate.
///
/// Email and username uniqueness is enforced by the storage layer's unique
/// constraints; implementations surface violations as the typed duplicate
/// errors.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Database` - Storage operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user whose username OR email equals `identifier`.
    ///
    /// Kept as an explicit two-clause lookup; login accepts either field.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, AuthError>;

    /// Retrieve all users, newest first.
    async fn list_all(&self) -> Result<Vec<User>, AuthError>;

    /// Persist changes to an existing user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DuplicateEmail` / `DuplicateUsername` - New value already taken
    /// * `Database` - Storage operation failed
    async fn update(&self, user: User) -> Result<User, AuthError>;
}
