use std::str::FromStr;

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
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

/// `POST /api/users` (admin only)
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command()?;
    let user = state.auth_service.register(command).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, UserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequestBody {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl CreateUserRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let email = EmailAddress::new(self.email).map_err(AuthError::from)?;
        let username = Username::new(self.username).map_err(AuthError::from)?;
        let role = match self.role {
            Some(role) => Role::from_str(&role).map_err(AuthError::from)?,
            None => Role::User,
        };

        Ok(RegisterUserCommand {
            email,
            username,
            password: self.password,
            full_name: self.full_name,
            role,
        })
    }
}
