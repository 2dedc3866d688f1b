//! `SeaORM` implementation of the `LedgerService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::entry::StockEntry;
use crate::models::user::Role;
use crate::services::ledger_service::{DeleteOutcome, LedgerError, LedgerService};
use crate::services::policy;

pub struct SeaOrmLedgerService {
    store: Store,
}

impl SeaOrmLedgerService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LedgerService for SeaOrmLedgerService {
    async fn list_entries(&self) -> Result<Vec<StockEntry>, LedgerError> {
        let rows = self.store.list_entries().await?;
        Ok(rows.into_iter().map(StockEntry::from).collect())
    }

    async fn delete_entry(
        &self,
        id: i32,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<DeleteOutcome, LedgerError> {
        let Some(added_by) = self.store.entry_added_by(id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        if !policy::can_delete_entry(acting_username, acting_role, &added_by) {
            return Ok(DeleteOutcome::PermissionDenied);
        }

        let affected = self
            .store
            .delete_entry_filtered(id, acting_username, acting_role)
            .await?;

        // A concurrent delete may have raced us between the read and the
        // filtered delete; that is a no-op, not an error.
        if affected == 0 {
            return Ok(DeleteOutcome::NotFound);
        }
        Ok(DeleteOutcome::Deleted)
    }

    async fn delete_range(
        &self,
        start_id: i32,
        end_id: i32,
        acting_role: Role,
    ) -> Result<u64, LedgerError> {
        if !policy::can_bulk_delete(acting_role) {
            return Err(LedgerError::PermissionDenied);
        }

        if start_id > end_id {
            return Err(LedgerError::InvalidRange);
        }

        Ok(self.store.delete_entry_range(start_id, end_id).await?)
    }
}
