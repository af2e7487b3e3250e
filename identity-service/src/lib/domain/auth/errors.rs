use auth::PasswordError;
use auth::PasswordPolicyError;
use auth::TokenError;
use thiserror::Error;

use crate::user::errors::EmailError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;
use crate::user::models::Role;

/// Top-level error for authentication and authorization operations.
///
/// Every variant except `Password` and `Database` is a recoverable,
/// caller-visible outcome; none are retried internally.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown identifier and wrong password are deliberately
    /// indistinguishable to avoid user enumeration.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Email already registered")]
    DuplicateEmail(String),

    #[error("Username already taken")]
    DuplicateUsername(String),

    #[error("Weak password: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// Token verification failure; carries the malformed / bad-signature /
    /// expired / wrong-kind distinction for tests and logs.
    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    /// The signed refresh token may still be cryptographically valid, but
    /// the store is authoritative: absent, revoked, or expired rows all land
    /// here, as does a missing or deactivated owner.
    #[error("Invalid or expired refresh token")]
    RefreshTokenUnknownOrRevoked,

    /// Refresh-token string collision on insert. Cryptographically
    /// negligible.
    #[error("Refresh token already exists")]
    DuplicateToken,

    #[error("Requires role: {0}")]
    Forbidden(Role),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Too many requests")]
    RateLimited,

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(String),
}
