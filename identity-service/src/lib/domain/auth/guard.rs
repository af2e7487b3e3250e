use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Enforce an exact role match for an already-authenticated caller.
///
/// The role model is flat: admin is not a superset of user. Callers needing
/// "admin implies user" must check both explicitly.
///
/// # Errors
/// * `Forbidden` - Caller's role is not exactly `role`
pub fn require_role(user: &User, role: Role) -> Result<&User, AuthError> {
    if user.role == role {
        Ok(user)
    } else {
        Err(AuthError::Forbidden(role))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    fn user_with_role(role: Role) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("admin@x.com".to_string()).unwrap(),
            username: Username::new("admin".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            full_name: None,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_exact_match_succeeds() {
        let admin = user_with_role(Role::Admin);
        assert!(require_role(&admin, Role::Admin).is_ok());

        let user = user_with_role(Role::User);
        assert!(require_role(&user, Role::User).is_ok());
    }

    #[test]
    fn test_no_role_hierarchy() {
        // Admin is not a superset of user under exact-match semantics
        let admin = user_with_role(Role::Admin);
        assert!(matches!(
            require_role(&admin, Role::User),
            Err(AuthError::Forbidden(Role::User))
        ));

        let user = user_with_role(Role::User);
        assert!(matches!(
            require_role(&user, Role::Admin),
            Err(AuthError::Forbidden(Role::Admin))
        ));
    }
}
