use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::inventory;
use crate::models::entry::NewStockEntry;
use crate::models::user::Role;

pub mod migrator;
pub mod repositories;

pub use repositories::user::UserRecord;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Idempotent credential-store initialization: makes sure the seeded
    /// admin account exists. Called on every process start.
    pub async fn initialize_credentials(&self, security: &SecurityConfig) -> Result<()> {
        self.user_repo().ensure_admin(security).await
    }

    #[must_use]
    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn inventory_repo(&self) -> repositories::inventory::InventoryRepository {
        repositories::inventory::InventoryRepository::new(self.conn.clone())
    }

    // ========== Credential store ==========

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        role: Role,
        starting_password: &str,
        must_change_password: bool,
        security: &SecurityConfig,
    ) -> Result<UserRecord> {
        self.user_repo()
            .create(
                username,
                role,
                starting_password,
                must_change_password,
                security,
            )
            .await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        must_change_password: bool,
        security: &SecurityConfig,
    ) -> Result<bool> {
        self.user_repo()
            .update_password(username, new_password, must_change_password, security)
            .await
    }

    pub async fn delete_user(&self, username: &str) -> Result<u64> {
        self.user_repo().delete(username).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.user_repo().list_all().await
    }

    // ========== Stock ledger ==========

    pub async fn insert_entry(&self, entry: &NewStockEntry) -> Result<i32> {
        self.inventory_repo().insert(entry).await
    }

    pub async fn list_entries(&self) -> Result<Vec<inventory::Model>> {
        self.inventory_repo().list_all().await
    }

    pub async fn entry_added_by(&self, id: i32) -> Result<Option<String>> {
        self.inventory_repo().added_by(id).await
    }

    pub async fn delete_entry_filtered(
        &self,
        id: i32,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<u64> {
        self.inventory_repo()
            .delete_filtered(id, acting_username, acting_role)
            .await
    }

    pub async fn delete_entry_range(&self, start_id: i32, end_id: i32) -> Result<u64> {
        self.inventory_repo().delete_range(start_id, end_id).await
    }
}
