use thiserror::Error;

/// First violated strength rule, in evaluation order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must contain at least {min} uppercase letters")]
    NotEnoughUppercase { min: usize },

    #[error("Password must contain at least {min} lowercase letters")]
    NotEnoughLowercase { min: usize },

    #[error("Password must contain at least {min} digits")]
    NotEnoughDigits { min: usize },

    #[error("Password must contain at least {min} special character")]
    NotEnoughSymbols { min: usize },
}

/// Stateless strength validator for plaintext passwords.
///
/// Rules are checked in a fixed order and the first failure wins:
/// length >= 12, uppercase >= 2, lowercase >= 2, digits >= 2, one character
/// from a fixed symbol set.
pub struct PasswordPolicy;

impl PasswordPolicy {
    const MIN_LENGTH: usize = 12;
    const MIN_UPPERCASE: usize = 2;
    const MIN_LOWERCASE: usize = 2;
    const MIN_DIGITS: usize = 2;
    const MIN_SYMBOLS: usize = 1;
    const SYMBOLS: &'static str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

    pub fn new() -> Self {
        Self
    }

    /// Validate a plaintext password against the strength rules.
    ///
    /// # Errors
    /// The first violated rule, as a [`PasswordPolicyError`] carrying a
    /// human-readable message.
    pub fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if count(password, |c| c.is_ascii_uppercase()) < Self::MIN_UPPERCASE {
            return Err(PasswordPolicyError::NotEnoughUppercase {
                min: Self::MIN_UPPERCASE,
            });
        }

        if count(password, |c| c.is_ascii_lowercase()) < Self::MIN_LOWERCASE {
            return Err(PasswordPolicyError::NotEnoughLowercase {
                min: Self::MIN_LOWERCASE,
            });
        }

        if count(password, |c| c.is_ascii_digit()) < Self::MIN_DIGITS {
            return Err(PasswordPolicyError::NotEnoughDigits {
                min: Self::MIN_DIGITS,
            });
        }

        if count(password, |c| Self::SYMBOLS.contains(c)) < Self::MIN_SYMBOLS {
            return Err(PasswordPolicyError::NotEnoughSymbols {
                min: Self::MIN_SYMBOLS,
            });
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

fn count(password: &str, predicate: impl Fn(char) -> bool) -> usize {
    password.chars().filter(|c| predicate(*c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_password_satisfying_all_rules() {
        let policy = PasswordPolicy::new();
        assert_eq!(policy.validate("ABcdefgh12!@"), Ok(()));
        assert_eq!(policy.validate("ABcd12!!efgh"), Ok(()));
    }

    #[test]
    fn test_rejects_short_password_first() {
        let policy = PasswordPolicy::new();
        // 9 chars; also short on uppercase, but length is checked first
        assert_eq!(
            policy.validate("Abcdefg1!"),
            Err(PasswordPolicyError::TooShort { min: 12 })
        );
    }

    #[test]
    fn test_rejects_too_few_uppercase() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("Abcdefgh123!"),
            Err(PasswordPolicyError::NotEnoughUppercase { min: 2 })
        );
    }

    #[test]
    fn test_rejects_too_few_lowercase() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("ABCDEFGh123!"),
            Err(PasswordPolicyError::NotEnoughLowercase { min: 2 })
        );
    }

    #[test]
    fn test_rejects_too_few_digits() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("ABcdefghij1!"),
            Err(PasswordPolicyError::NotEnoughDigits { min: 2 })
        );
    }

    #[test]
    fn test_rejects_missing_symbol() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("ABcdefghij12"),
            Err(PasswordPolicyError::NotEnoughSymbols { min: 1 })
        );
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let policy = PasswordPolicy::new();
        // Violates every rule except length; the uppercase rule must win
        assert_eq!(
            policy.validate("............"),
            Err(PasswordPolicyError::NotEnoughUppercase { min: 2 })
        );
    }
}
