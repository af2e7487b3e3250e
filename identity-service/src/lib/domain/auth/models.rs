use chrono::DateTime;
use chrono::Utc;

use crate::user::models::UserId;

/// Persisted refresh-token row.
///
/// State transitions: Active -> Revoked (logout, terminal) or
/// Active -> Expired (by time, detected lazily at lookup). Once `revoked` is
/// set the row can never become valid again; rows are never physically
/// deleted by this core.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Usable only while not revoked and not past expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}

/// Token pair returned by login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "bearer"
    pub token_type: &'static str,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(revoked: bool, expires_in: Duration) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord {
            token: "token".to_string(),
            user_id: UserId::new(),
            expires_at: now + expires_in,
            revoked,
            created_at: now,
        }
    }

    #[test]
    fn test_active_record() {
        assert!(record(false, Duration::days(7)).is_active(Utc::now()));
    }

    #[test]
    fn test_revoked_record_is_inactive() {
        assert!(!record(true, Duration::days(7)).is_active(Utc::now()));
    }

    #[test]
    fn test_expired_record_is_inactive() {
        assert!(!record(false, Duration::seconds(-1)).is_active(Utc::now()));
    }
}
