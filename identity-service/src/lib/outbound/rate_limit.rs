use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::RateLimiter;

/// In-memory fixed-window rate limiter.
///
/// Counts requests per key inside a one-minute window and rejects once the
/// budget is exhausted. Single-process scope only, matching the rest of the
/// service's state model.
pub struct FixedWindowRateLimiter {
    budget_per_minute: u32,
    window: Duration,
    windows: Mutex<HashMap<String, (Instant, u32)>>,
}

impl FixedWindowRateLimiter {
    pub fn new(budget_per_minute: u32) -> Self {
        Self {
            budget_per_minute,
            window: Duration::from_secs(60),
            windows: Mutex::new(HashMap::new()),
        }
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, key: &str) -> Result<(), AuthError> {
        let now = Instant::now();
        // Counters are trivially consistent, so a poisoned lock is recoverable
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let entry = windows.entry(key.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }

        if entry.1 >= self.budget_per_minute {
            tracing::warn!(key, "Rate limit exceeded");
            return Err(AuthError::RateLimited);
        }

        entry.1 += 1;
        Ok(())
    }
}

/// No-op limiter used when no budget is configured.
///
/// Injected in place of the real implementation so the service never
/// branches on whether rate limiting is enabled.
pub struct NoopRateLimiter;

impl RateLimiter for NoopRateLimiter {
    fn check(&self, _key: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_budget_then_rejects() {
        let limiter = FixedWindowRateLimiter::new(3);

        for _ in 0..3 {
            assert!(limiter.check("login:alice").is_ok());
        }
        assert!(matches!(
            limiter.check("login:alice"),
            Err(AuthError::RateLimited)
        ));
    }

    #[test]
    fn test_budgets_are_per_key() {
        let limiter = FixedWindowRateLimiter::new(1);

        assert!(limiter.check("login:alice").is_ok());
        assert!(limiter.check("login:bob").is_ok());
        assert!(limiter.check("login:alice").is_err());
    }

    #[test]
    fn test_noop_never_rejects() {
        let limiter = NoopRateLimiter;
        for _ in 0..1000 {
            assert!(limiter.check("login:alice").is_ok());
        }
    }
}
