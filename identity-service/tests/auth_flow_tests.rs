mod common;

use std::sync::Arc;

use auth::TokenKind;
use common::test_service;
use common::test_service_with_limiter;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::guard::require_role;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::RegisterUserCommand;
use identity_service::domain::user::models::Role;
use identity_service::domain::user::models::Username;
use identity_service::outbound::rate_limit::FixedWindowRateLimiter;

const PASSWORD: &str = "ABcd12!!efgh";

fn admin_command() -> RegisterUserCommand {
    RegisterUserCommand {
        email: EmailAddress::new("admin@example.com".to_string()).unwrap(),
        username: Username::new("admin".to_string()).unwrap(),
        password: PASSWORD.to_string(),
        full_name: Some("Site Admin".to_string()),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn test_register_login_and_resolve_identity() {
    let service = test_service();

    let registered = service.register(admin_command()).await.unwrap();
    assert_eq!(registered.role, Role::Admin);
    assert!(registered.is_active);
    assert!(registered.last_login.is_none());
    assert_ne!(registered.password_hash, PASSWORD);

    // Login by username, then again by email; both resolve the same account.
    let pair = service.login("admin", PASSWORD).await.unwrap();
    assert_eq!(pair.token_type, "bearer");
    assert_eq!(pair.expires_in, 30 * 60);

    let by_email = service.login("admin@example.com", PASSWORD).await.unwrap();
    assert_ne!(pair.refresh_token, by_email.refresh_token);

    let caller = service.current_identity(&pair.access_token).await.unwrap();
    assert_eq!(caller.id, registered.id);
    assert!(caller.last_login.is_some());

    // Exact-match authorization: admin passes the admin gate but not the
    // user gate.
    assert!(require_role(&caller, Role::Admin).is_ok());
    assert!(matches!(
        require_role(&caller, Role::User),
        Err(AuthError::Forbidden(Role::User))
    ));
}

#[tokio::test]
async fn test_tokens_are_not_interchangeable() {
    let service = test_service();
    service.register(admin_command()).await.unwrap();
    let pair = service.login("admin", PASSWORD).await.unwrap();

    // A refresh token presented as an access token is rejected, and vice
    // versa.
    let err = service
        .current_identity(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Token(auth::TokenError::WrongKind {
            expected: TokenKind::Access,
            actual: TokenKind::Refresh,
        })
    ));

    let err = service.refresh(&pair.access_token).await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::Token(auth::TokenError::WrongKind {
            expected: TokenKind::Refresh,
            actual: TokenKind::Access,
        })
    ));
}

#[tokio::test]
async fn test_refresh_succeeds_until_logout() {
    let service = test_service();
    service.register(admin_command()).await.unwrap();
    let pair = service.login("admin", PASSWORD).await.unwrap();

    // No rotation: the same refresh token works repeatedly.
    let renewed = service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(renewed.refresh_token, pair.refresh_token);
    let renewed_again = service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(renewed_again.refresh_token, pair.refresh_token);

    service.logout(&pair.refresh_token).await.unwrap();

    // The signature is still valid after logout; the store says no.
    let err = service.refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthError::RefreshTokenUnknownOrRevoked));

    // Logout stays idempotent.
    service.logout(&pair.refresh_token).await.unwrap();
    service.logout("never-issued").await.unwrap();
}

#[tokio::test]
async fn test_sessions_are_revoked_independently() {
    let service = test_service();
    service.register(admin_command()).await.unwrap();

    let first = service.login("admin", PASSWORD).await.unwrap();
    let second = service.login("admin", PASSWORD).await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);

    service.logout(&first.refresh_token).await.unwrap();

    let err = service.refresh(&first.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthError::RefreshTokenUnknownOrRevoked));
    assert!(service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let service = test_service();
    service.register(admin_command()).await.unwrap();

    let wrong_password = service.login("admin", "Wrong12!!pass").await.unwrap_err();
    let unknown_user = service.login("nobody", PASSWORD).await.unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let service = test_service();
    service.register(admin_command()).await.unwrap();

    let same_email = RegisterUserCommand {
        username: Username::new("other".to_string()).unwrap(),
        ..admin_command()
    };
    assert!(matches!(
        service.register(same_email).await.unwrap_err(),
        AuthError::DuplicateEmail(_)
    ));

    let same_username = RegisterUserCommand {
        email: EmailAddress::new("other@example.com".to_string()).unwrap(),
        ..admin_command()
    };
    assert!(matches!(
        service.register(same_username).await.unwrap_err(),
        AuthError::DuplicateUsername(_)
    ));
}

#[tokio::test]
async fn test_login_budget_is_enforced_per_identifier() {
    let service = test_service_with_limiter(Arc::new(FixedWindowRateLimiter::new(2)));
    service.register(admin_command()).await.unwrap();

    // Failed attempts consume budget too.
    assert!(service.login("admin", "Wrong12!!pass").await.is_err());
    assert!(service.login("admin", PASSWORD).await.is_ok());

    let err = service.login("admin", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::RateLimited));

    // A different identifier has its own budget.
    assert!(matches!(
        service.login("other", PASSWORD).await.unwrap_err(),
        AuthError::InvalidCredentials
    ));
}
