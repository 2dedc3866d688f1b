use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogSource, DefaultIntakeService, IntakeService, JsonCatalog, LedgerService,
    SeaOrmAuthService, SeaOrmLedgerService, SnapshotService, StaticCatalog,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub catalog: Arc<dyn CatalogSource>,

    pub auth_service: Arc<dyn AuthService>,

    pub intake_service: Arc<dyn IntakeService>,

    pub ledger_service: Arc<dyn LedgerService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;
        store.initialize_credentials(&config.security).await?;

        let catalog: Arc<dyn CatalogSource> =
            match JsonCatalog::load(Path::new(&config.catalog.master_path)) {
                Ok(catalog) => Arc::new(catalog),
                Err(e) => {
                    // The app stays usable (login, listing, deletion); only
                    // new intake needs the master.
                    warn!("Item master unavailable: {e}");
                    Arc::new(StaticCatalog::default())
                }
            };

        let snapshots = SnapshotService::new(config.general.images_path.as_str());

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config.security.clone()))
            as Arc<dyn AuthService>;
        let intake_service = Arc::new(DefaultIntakeService::new(
            store.clone(),
            catalog.clone(),
            snapshots,
        )) as Arc<dyn IntakeService>;
        let ledger_service =
            Arc::new(SeaOrmLedgerService::new(store.clone())) as Arc<dyn LedgerService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            catalog,
            auth_service,
            intake_service,
            ledger_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
