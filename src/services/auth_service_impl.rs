//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::constants::auth::{DEFAULT_USER_PASSWORD, MIN_PASSWORD_LENGTH};
use crate::db::Store;
use crate::models::user::Role;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserSummary};
use crate::services::policy;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_new_password(new_password: &str) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(LoginResult {
            username: user.username,
            role: user.role,
            must_change_password: user.must_change_password,
        })
    }

    async fn set_password(
        &self,
        username: &str,
        new_password: &str,
        must_change_password: bool,
    ) -> Result<(), AuthError> {
        Self::validate_new_password(new_password)?;

        let found = self
            .store
            .update_user_password(username, new_password, must_change_password, &self.security)
            .await?;

        if !found {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        Self::validate_new_password(new_password)?;

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        // Verify current password before touching anything
        let verified = self
            .store
            .verify_user_password(username, current_password)
            .await?;

        if verified.is_none() {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.set_password(username, new_password, false).await
    }

    async fn create_user(
        &self,
        username: &str,
        role: Role,
        acting_role: Role,
    ) -> Result<UserSummary, AuthError> {
        if !policy::can_manage_users(acting_role) {
            return Err(AuthError::PermissionDenied);
        }

        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let record = self
            .store
            .create_user(username, role, DEFAULT_USER_PASSWORD, true, &self.security)
            .await?;

        Ok(UserSummary {
            id: record.id,
            username: record.username,
            role: record.role,
            must_change_password: record.must_change_password,
        })
    }

    async fn reset_password(&self, username: &str, acting_role: Role) -> Result<(), AuthError> {
        if !policy::can_manage_users(acting_role) {
            return Err(AuthError::PermissionDenied);
        }

        let found = self
            .store
            .update_user_password(username, DEFAULT_USER_PASSWORD, true, &self.security)
            .await?;

        if !found {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn delete_user(
        &self,
        target_username: &str,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<(), AuthError> {
        if !policy::can_manage_users(acting_role) {
            return Err(AuthError::PermissionDenied);
        }

        if !policy::can_delete_user(target_username, acting_username) {
            // Distinguish the two refusals so the caller can say which rule hit.
            if target_username == crate::constants::ADMIN_USERNAME {
                return Err(AuthError::CannotDeleteAdmin);
            }
            return Err(AuthError::CannotDeleteSelf);
        }

        let affected = self.store.delete_user(target_username).await?;
        if affected == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn list_users(&self, acting_role: Role) -> Result<Vec<UserSummary>, AuthError> {
        if !policy::can_manage_users(acting_role) {
            return Err(AuthError::PermissionDenied);
        }

        let users = self.store.list_users().await?;
        Ok(users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                username: u.username,
                role: u.role,
                must_change_password: u.must_change_password,
            })
            .collect())
    }
}
