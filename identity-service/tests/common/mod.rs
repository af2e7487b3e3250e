use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use chrono::DateTime;
use chrono::Utc;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::models::RefreshTokenRecord;
use identity_service::domain::auth::ports::RateLimiter;
use identity_service::domain::auth::ports::RefreshTokenStore;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::outbound::rate_limit::NoopRateLimiter;

pub const SECRET: &[u8] = b"integration_test_secret_32_bytes!!";

/// In-memory user repository mirroring the storage layer's unique
/// constraints on email and username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail(user.email.to_string()));
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername(user.username.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.as_str() == identifier || u.email.as_str() == identifier)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(AuthError::UserNotFound(user.id.to_string())),
        }
    }
}

/// In-memory refresh-token registry with revoke-in-place semantics.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    rows: Mutex<Vec<RefreshTokenRecord>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn persist(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.token == token) {
            return Err(AuthError::DuplicateToken);
        }
        rows.push(RefreshTokenRecord {
            token: token.to_string(),
            user_id: *user_id,
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn find_active(
        &self,
        token: &str,
        user_id: &UserId,
    ) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.token == token && r.user_id == *user_id && r.is_active(Utc::now()))
            .cloned())
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.token == token) {
            row.revoked = true;
        }
        Ok(())
    }
}

pub type TestAuthService = AuthService<InMemoryUserRepository, InMemoryRefreshTokenStore>;

pub fn test_service() -> TestAuthService {
    test_service_with_limiter(Arc::new(NoopRateLimiter))
}

pub fn test_service_with_limiter(rate_limiter: Arc<dyn RateLimiter>) -> TestAuthService {
    AuthService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryRefreshTokenStore::default()),
        rate_limiter,
        Arc::new(TokenCodec::new(SECRET)),
        30,
        7,
    )
}
