use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RefreshTokenRecord;
use crate::domain::auth::ports::RefreshTokenStore;
use crate::domain::user::models::UserId;

#[derive(Debug, FromRow)]
struct RefreshTokenRow {
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    is_revoked: bool,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshTokenRecord {
            token: row.token,
            user_id: UserId(row.user_id),
            expires_at: row.expires_at,
            revoked: row.is_revoked,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed registry of issued refresh tokens.
///
/// Rows are revoked in place, never deleted; expiry is detected lazily in
/// the lookup predicate.
pub struct PostgresRefreshTokenStore {
    pool: PgPool,
}

impl PostgresRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PostgresRefreshTokenStore {
    async fn persist(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, is_revoked, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            "#,
        )
        .bind(token)
        .bind(user_id.0)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::DuplicateToken;
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn find_active(
        &self,
        token: &str,
        user_id: &UserId,
    ) -> Result<Option<RefreshTokenRecord>, AuthError> {
        // Revoked and expired rows fall out of the predicate so callers see
        // them exactly like absent rows
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, user_id, expires_at, is_revoked, created_at
            FROM refresh_tokens
            WHERE token = $1 AND user_id = $2 AND is_revoked = FALSE AND expires_at > $3
            "#,
        )
        .bind(token)
        .bind(user_id.0)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(row.map(RefreshTokenRecord::from))
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        // Zero affected rows is still success; revoke must stay idempotent
        sqlx::query("UPDATE refresh_tokens SET is_revoked = TRUE WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }
}
