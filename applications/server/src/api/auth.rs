/// Authentication API routes
use super::extract::JsonBody;
use crate::{
    error::Result,
    middleware::AuthenticatedUser,
    services::{RefreshedSession, SessionIdentity},
    state::AppState,
};
use axum::{extract::State, Json};
use notes_core::{validation::LoginForm, UserInfo};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /api/auth.login
pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(form): JsonBody<LoginForm>,
) -> Result<Json<SessionIdentity>> {
    let session = app_state.accounts.authorize(form).await?;
    Ok(Json(session))
}

/// POST /api/auth.refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<RefreshedSession>> {
    let session = app_state.accounts.refresh(&req.refresh_token).await?;
    Ok(Json(session))
}

/// GET /api/auth.session
pub async fn session(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<UserInfo>> {
    let user = app_state.accounts.current_user(&caller).await?;
    Ok(Json(user))
}
