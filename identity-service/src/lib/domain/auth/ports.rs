use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RefreshTokenRecord;
use crate::domain::auth::models::TokenPair;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new active user (admin-driven creation).
    ///
    /// # Errors
    /// * `WeakPassword` - Password fails the strength policy
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Database` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Authenticate by username or email plus password, issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `InactiveAccount` - Credentials valid but account deactivated
    /// * `RateLimited` - Login budget exhausted
    async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Mint a new access token from a still-valid refresh token.
    ///
    /// The refresh token is echoed back unchanged (no rotation).
    ///
    /// # Errors
    /// * `Token` - Refresh token malformed, badly signed, expired, or of the
    ///   wrong kind
    /// * `RefreshTokenUnknownOrRevoked` - Store row absent, revoked, or
    ///   expired, or the owner is missing or inactive
    /// * `RateLimited` - Refresh budget exhausted
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Revoke a refresh token. Idempotent: unknown and already-revoked
    /// tokens succeed silently.
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Resolve the caller behind an access token, re-validated against live
    /// user state on every call.
    ///
    /// # Errors
    /// * `Token` - Access token malformed, badly signed, expired, or of the
    ///   wrong kind
    /// * `InvalidCredentials` - Subject no longer exists
    /// * `InactiveAccount` - Subject was deactivated after issuance
    async fn current_identity(&self, access_token: &str) -> Result<User, AuthError>;

    /// Retrieve a user by identifier (admin user management).
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, AuthError>;

    /// Retrieve all users (admin user management).
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;

    /// Partially update a user (admin user management). A provided password
    /// is policy-validated and re-hashed.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `WeakPassword` - New password fails the strength policy
    /// * `DuplicateEmail` / `DuplicateUsername` - New value already taken
    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, AuthError>;
}

/// Persistence-backed registry of issued refresh tokens.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Insert a new row for a freshly issued token.
    ///
    /// # Errors
    /// * `DuplicateToken` - Token string collision (negligible probability)
    /// * `Database` - Storage operation failed
    async fn persist(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError>;

    /// Find a usable row for this token and owner.
    ///
    /// Returns `None` for absent, revoked, and expired rows alike; callers
    /// must not distinguish them.
    async fn find_active(
        &self,
        token: &str,
        user_id: &UserId,
    ) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Set `revoked = true` on the matching row. Revoking an unknown or
    /// already-revoked token is a no-op, not an error.
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;
}

/// Request-budget capability injected at startup.
///
/// The real implementation enforces a per-minute budget; the no-op one is
/// used when no budget is configured, so the core never branches on
/// configuration.
pub trait RateLimiter: Send + Sync + 'static {
    /// Consume one unit of budget for `key`.
    ///
    /// # Errors
    /// * `RateLimited` - Budget for this key is exhausted
    fn check(&self, key: &str) -> Result<(), AuthError>;
}
