pub mod policy;

pub mod normalize;

pub mod catalog;
pub use catalog::{CatalogError, CatalogSource, JsonCatalog, StaticCatalog};

pub mod snapshot;
pub use snapshot::SnapshotService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserSummary};
pub use auth_service_impl::SeaOrmAuthService;

pub mod ledger_service;
pub mod ledger_service_impl;
pub use ledger_service::{DeleteOutcome, LedgerError, LedgerService};
pub use ledger_service_impl::SeaOrmLedgerService;

pub mod intake_service;
pub mod intake_service_impl;
pub use intake_service::{IntakeError, IntakeService, SubmitReceipt};
pub use intake_service_impl::DefaultIntakeService;
