use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// `GET /api/users` (admin only)
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state.auth_service.list_users().await?;
    let data = users.iter().map(UserData::from).collect();

    Ok(ApiSuccess::new(StatusCode::OK, data))
}
