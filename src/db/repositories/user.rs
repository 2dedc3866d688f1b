use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::constants::{ADMIN_USERNAME, auth::DEFAULT_ADMIN_PASSWORD};
use crate::entities::users;
use crate::models::user::Role;

/// Account data returned from the repository (without the password hash).
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: Role::from_db(&model.role),
            must_change_password: model.must_change_password,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get account by exact (case-sensitive) username match
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(UserRecord::from))
    }

    /// Verify a password and return the account on success, `None` on an
    /// unknown username or a mismatch. Never an error for a failed login.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is
    /// CPU-intensive and would block the async runtime if run directly.
    pub async fn verify_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| UserRecord::from(user)))
    }

    /// Insert a new account with the given starting password. Uniqueness
    /// and username shape are checked by the caller.
    pub async fn create(
        &self,
        username: &str,
        role: Role,
        starting_password: &str,
        must_change_password: bool,
        config: &SecurityConfig,
    ) -> Result<UserRecord> {
        let password = starting_password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            must_change_password: Set(must_change_password),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        info!(username = %model.username, role = %model.role, "Created user");
        Ok(UserRecord::from(model))
    }

    /// Overwrite the password hash and the must-change flag. Returns
    /// `false` when no such account exists.
    pub async fn update_password(
        &self,
        username: &str,
        new_password: &str,
        must_change_password: bool,
        config: &SecurityConfig,
    ) -> Result<bool> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password update")?;

        let Some(user) = user else {
            return Ok(false);
        };

        let password = new_password.to_string();
        let config = config.clone();
        let new_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(new_hash);
        active.must_change_password = Set(must_change_password);
        active.updated_at = Set(now);
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Remove an account. The admin/self guards live in the auth service.
    pub async fn delete(&self, username: &str) -> Result<u64> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected > 0 {
            info!(username = %username, "Deleted user");
        }
        Ok(result.rows_affected)
    }

    pub async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    /// Seed the admin account if it does not exist. Safe to call on every
    /// process start.
    pub async fn ensure_admin(&self, config: &SecurityConfig) -> Result<()> {
        if self.get_by_username(ADMIN_USERNAME).await?.is_some() {
            return Ok(());
        }

        self.create(
            ADMIN_USERNAME,
            Role::Admin,
            DEFAULT_ADMIN_PASSWORD,
            false,
            config,
        )
        .await?;

        info!("Seeded default admin account");
        Ok(())
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None, // output length (use default)
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
