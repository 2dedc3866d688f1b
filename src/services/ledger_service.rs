//! Domain service for reading and deleting ledger rows.

use thiserror::Error;

use crate::models::entry::StockEntry;
use crate::models::user::Role;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Start ID cannot be greater than End ID")]
    InvalidRange,

    #[error("Not permitted")]
    PermissionDenied,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for LedgerError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Outcome of a single-row delete attempt. Denial and absence are distinct
/// so the caller can decide how much to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    PermissionDenied,
}

/// Domain service trait for the stock ledger.
#[async_trait::async_trait]
pub trait LedgerService: Send + Sync {
    /// Every receipt, newest first, with `total_value` computed.
    async fn list_entries(&self) -> Result<Vec<StockEntry>, LedgerError>;

    /// Deletes one receipt if the actor is an admin or owns it.
    async fn delete_entry(
        &self,
        id: i32,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<DeleteOutcome, LedgerError>;

    /// Deletes every receipt in the inclusive id range and returns the
    /// affected count.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PermissionDenied`] for non-admins and
    /// [`LedgerError::InvalidRange`] for a reversed range, both before any
    /// store access.
    async fn delete_range(
        &self,
        start_id: i32,
        end_id: i32,
        acting_role: Role,
    ) -> Result<u64, LedgerError>;
}
