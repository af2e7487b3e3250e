use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

/// `PUT /api/users/:user_id` (admin only)
///
/// Partial update; omitted fields are left untouched.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(AuthError::from)?;
    let command = body.try_into_command()?;
    let user = state.auth_service.update_user(&user_id, command).await?;

    Ok(ApiSuccess::new(StatusCode::OK, UserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequestBody {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Omitted = leave unchanged; explicit `null` = clear the name
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Keeps an explicit `null` distinguishable from an absent field: missing
/// falls back to the outer `None` via `default`, while any present value
/// (including `null`) lands in `Some(...)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_distinguishes_omitted_null_and_value() {
        let omitted: UpdateUserRequestBody = serde_json::from_str("{}").unwrap();
        assert_eq!(omitted.full_name, None);

        let cleared: UpdateUserRequestBody =
            serde_json::from_str(r#"{"full_name": null}"#).unwrap();
        assert_eq!(cleared.full_name, Some(None));

        let set: UpdateUserRequestBody =
            serde_json::from_str(r#"{"full_name": "Site Admin"}"#).unwrap();
        assert_eq!(set.full_name, Some(Some("Site Admin".to_string())));
    }
}

impl UpdateUserRequestBody {
    fn try_into_command(self) -> Result<UpdateUserCommand, ApiError> {
        let email = self
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(AuthError::from)?;
        let username = self
            .username
            .map(Username::new)
            .transpose()
            .map_err(AuthError::from)?;
        let role = self
            .role
            .as_deref()
            .map(Role::from_str)
            .transpose()
            .map_err(AuthError::from)?;

        Ok(UpdateUserCommand {
            email,
            username,
            password: self.password,
            full_name: self.full_name,
            role,
            is_active: self.is_active,
        })
    }
}
