/// Registration API routes
use super::extract::JsonBody;
use crate::{error::Result, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use notes_core::{validation::RegistrationForm, UserInfo};

/// POST /api/registration.registerUser
pub async fn register_user(
    State(app_state): State<AppState>,
    JsonBody(form): JsonBody<RegistrationForm>,
) -> Result<(StatusCode, Json<UserInfo>)> {
    let user = app_state.accounts.register(form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
