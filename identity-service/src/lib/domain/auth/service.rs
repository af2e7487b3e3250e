use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::TokenCodec;
use auth::TokenError;
use auth::TokenKind;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::RateLimiter;
use crate::domain::auth::ports::RefreshTokenStore;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const TOKEN_TYPE: &str = "bearer";

/// Authentication service orchestrating password verification, token
/// issuance, and refresh-token lifecycle.
///
/// Stateless request-to-request apart from the injected collaborators; each
/// call runs as an independent unit of work.
pub struct AuthService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RS>,
    rate_limiter: Arc<dyn RateLimiter>,
    codec: Arc<TokenCodec>,
    password_hasher: Arc<PasswordHasher>,
    password_policy: PasswordPolicy,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<UR, RS> AuthService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh-token registry implementation
    /// * `rate_limiter` - Request-budget capability (real or no-op)
    /// * `codec` - Token codec configured with the process-wide secret
    /// * `access_token_expire_minutes` - Access-token TTL (minutes scale)
    /// * `refresh_token_expire_days` - Refresh-token TTL (days scale)
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RS>,
        rate_limiter: Arc<dyn RateLimiter>,
        codec: Arc<TokenCodec>,
        access_token_expire_minutes: i64,
        refresh_token_expire_days: i64,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            rate_limiter,
            codec,
            password_hasher: Arc::new(PasswordHasher::new()),
            password_policy: PasswordPolicy::new(),
            access_ttl: Duration::minutes(access_token_expire_minutes),
            refresh_ttl: Duration::days(refresh_token_expire_days),
        }
    }

    /// Argon2 hashing is CPU-bound; run it off the async reactor so it
    /// cannot starve unrelated requests.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                AuthError::Password(PasswordError::HashingFailed(format!(
                    "hashing task panicked: {e}"
                )))
            })??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                AuthError::Password(PasswordError::VerificationFailed(format!(
                    "verification task panicked: {e}"
                )))
            })??;
        Ok(valid)
    }

    fn sign_access_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = Claims::access(user.id, user.email.as_str(), user.username.as_str());
        Ok(self.codec.sign(claims, self.access_ttl)?)
    }

    async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_token = self.sign_access_token(user)?;

        let refresh_token = self
            .codec
            .sign(Claims::refresh(user.id), self.refresh_ttl)?;
        let expires_at = Utc::now() + self.refresh_ttl;
        self.refresh_tokens
            .persist(&user.id, &refresh_token, expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE,
            expires_in: self.access_ttl.num_seconds(),
        })
    }
}

#[async_trait]
impl<UR, RS> AuthServicePort for AuthService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        self.password_policy.validate(&command.password)?;

        if self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }
        if self
            .users
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            username: command.username,
            password_hash,
            full_name: command.full_name,
            role: command.role,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };

        let user = self.users.insert(user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair, AuthError> {
        self.rate_limiter.check(&format!("login:{identifier}"))?;

        // Unknown identifier and wrong password must be indistinguishable
        let Some(mut user) = self.users.find_by_username_or_email(identifier).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let valid = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        user.last_login = Some(Utc::now());
        let user = self.users.update(user).await?;

        let pair = self.issue_token_pair(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "Login succeeded");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.codec.verify(refresh_token, TokenKind::Refresh)?;

        // We signed the subject ourselves; a bad one means a foreign token
        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::Token(TokenError::Malformed(e.to_string())))?;

        self.rate_limiter.check(&format!("refresh:{user_id}"))?;

        // Store state is authoritative: a revoked or expired row invalidates
        // the token even while its signature is still good
        if self
            .refresh_tokens
            .find_active(refresh_token, &user_id)
            .await?
            .is_none()
        {
            return Err(AuthError::RefreshTokenUnknownOrRevoked);
        }

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::RefreshTokenUnknownOrRevoked)?;

        let access_token = self.sign_access_token(&user)?;

        // No rotation: the same refresh token stays usable until it expires
        // or is revoked
        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
            token_type: TOKEN_TYPE,
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.revoke(refresh_token).await
    }

    async fn current_identity(&self, access_token: &str) -> Result<User, AuthError> {
        let claims = self.codec.verify(access_token, TokenKind::Access)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::Token(TokenError::Malformed(e.to_string())))?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Re-validated on every call: a still-valid token does not outlive a
        // deactivation
        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.users.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, AuthError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            user.email = new_email;
        }
        if let Some(new_username) = command.username {
            user.username = new_username;
        }
        if let Some(new_full_name) = command.full_name {
            user.full_name = new_full_name;
        }
        if let Some(new_role) = command.role {
            user.role = new_role;
        }
        if let Some(new_is_active) = command.is_active {
            user.is_active = new_is_active;
        }
        if let Some(new_password) = command.password {
            self.password_policy.validate(&new_password)?;
            user.password_hash = self.hash_password(new_password).await?;
        }

        self.users.update(user).await
    }
}
