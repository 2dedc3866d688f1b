//! Domain service for authentication and user administration.
//!
//! Handles login, password changes and the admin-only account lifecycle.

use serde::Serialize;
use thiserror::Error;

use crate::models::user::Role;

/// Errors specific to authentication and account management.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("The admin account cannot be deleted")]
    CannotDeleteAdmin,

    #[error("You cannot delete your own account")]
    CannotDeleteSelf,

    #[error("Not permitted")]
    PermissionDenied,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Successful login: who the actor is and whether a password rotation is
/// still pending.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
}

/// One row of the user listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
}

/// Domain service trait for authentication and user administration.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on an unknown username or
    /// a password mismatch; a failed login is never anything stronger.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Overwrites the stored hash and the must-change flag.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PasswordTooShort`] below the minimum length.
    async fn set_password(
        &self,
        username: &str,
        new_password: &str,
        must_change_password: bool,
    ) -> Result<(), AuthError>;

    /// Changes a user's own password after verifying the current one, and
    /// clears any pending rotation flag.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Creates an account with the fixed starting password and a pending
    /// password rotation. Admin-only.
    async fn create_user(
        &self,
        username: &str,
        role: Role,
        acting_role: Role,
    ) -> Result<UserSummary, AuthError>;

    /// Resets an account back to the starting password and re-arms the
    /// rotation flag. Admin-only.
    async fn reset_password(&self, username: &str, acting_role: Role) -> Result<(), AuthError>;

    /// Deletes an account. Admin-only; the seeded admin and the acting
    /// user's own account are refused.
    async fn delete_user(
        &self,
        target_username: &str,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<(), AuthError>;

    /// All accounts in creation order. Admin-only.
    async fn list_users(&self, acting_role: Role) -> Result<Vec<UserSummary>, AuthError>;
}
