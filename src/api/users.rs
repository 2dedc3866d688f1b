use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{current_user, require_admin};
use super::validation::validate_username;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::user::Role;
use crate::services::UserSummary;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

const fn default_role() -> Role {
    Role::User
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let user = current_user(&session).await?;
    require_admin(&user)?;

    let users = state.auth().list_users(user.role).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /users
/// Create an account with the fixed starting password; the new user must
/// change it on first login.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserSummary>>, ApiError> {
    let actor = current_user(&session).await?;
    require_admin(&actor)?;

    let username = validate_username(&payload.username)?;

    let created = state
        .auth()
        .create_user(username, payload.role, actor.role)
        .await?;

    Ok(Json(ApiResponse::success(created)))
}

/// DELETE /users/{username}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let actor = current_user(&session).await?;
    require_admin(&actor)?;

    state
        .auth()
        .delete_user(&username, &actor.username, actor.role)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "User '{username}' deleted"
    )))))
}

/// POST /users/{username}/reset-password
/// Reset an account to the starting password and re-arm the rotation flag.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let actor = current_user(&session).await?;
    require_admin(&actor)?;

    state.auth().reset_password(&username, actor.role).await?;

    tracing::info!(username = %username, by = %actor.username, "Password reset");

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Password for '{username}' reset"
    )))))
}
