//! Authentication infrastructure library
//!
//! Provides the reusable building blocks for credential issuance:
//! - Password hashing (Argon2id) and password strength policy
//! - Signed bearer token generation and validation (HS256)
//!
//! The service crate defines its own ports and adapts these implementations,
//! keeping domain logic out of this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::{Claims, TokenCodec, TokenKind};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::access("user123", "alice@example.com", "alice");
//! let token = codec.sign(claims, Duration::minutes(30)).unwrap();
//! let decoded = codec.verify(&token, TokenKind::Access).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordPolicyError;
