use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::user::Role;

/// Session key the logged-in actor is stored under.
const SESSION_USER_KEY: &str = "user";

/// The actor attached to a session after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware: every protected route requires a session
/// established by `POST /auth/login`.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user)) = session.get::<SessionUser>(SESSION_USER_KEY).await {
        tracing::Span::current().record("user_id", &user.username);
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with username and password and establish a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth()
        .login(&payload.username, &payload.password)
        .await?;

    let user = SessionUser {
        username: result.username.clone(),
        role: result.role,
        must_change_password: result.must_change_password,
    };

    if let Err(e) = session.insert(SESSION_USER_KEY, &user).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        username: result.username,
        role: result.role,
        must_change_password: result.must_change_password,
    })))
}

/// POST /auth/logout
/// Invalidate the current session (and any captured entry draft with it).
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Get the logged-in actor (requires authentication)
pub async fn get_current_user(
    session: Session,
) -> Result<Json<ApiResponse<SessionUser>>, ApiError> {
    let user = current_user(&session).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/password
/// Change own password (requires current password verification)
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let mut user = current_user(&session).await?;

    state
        .auth()
        .change_password(
            &user.username,
            &payload.current_password,
            &payload.new_password,
        )
        .await?;

    // The pending-rotation flag is cleared by the change; keep the session
    // in step with the store.
    user.must_change_password = false;
    session
        .insert(SESSION_USER_KEY, &user)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    tracing::info!(username = %user.username, "Password changed");

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}

// ============================================================================
// Helpers
// ============================================================================

/// Get the actor from the session, returns error if not authenticated
pub async fn current_user(session: &Session) -> Result<SessionUser, ApiError> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

/// Admin gate for the user-management and bulk-delete handlers.
pub fn require_admin(user: &SessionUser) -> Result<(), ApiError> {
    if user.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }
    Ok(())
}
