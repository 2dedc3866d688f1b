//! Domain service for validating and persisting stock receipts.

use serde::Serialize;
use thiserror::Error;

use crate::models::entry::StockCandidate;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,

    #[error("Price must be greater than 0")]
    NonPositivePrice,

    #[error("Unknown item master id: {0}")]
    UnknownItem(String),

    #[error("Failed to store snapshot: {0}")]
    Snapshot(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for IntakeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for IntakeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmitReceipt {
    pub id: i32,
    pub total_value: f64,
}

/// Domain service trait for stock intake.
#[async_trait::async_trait]
pub trait IntakeService: Send + Sync {
    /// Validates, normalizes and persists one receipt, returning the new
    /// row id. On success the caller must clear its transient capture
    /// state so the next entry starts blank.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NonPositiveQuantity`] /
    /// [`IntakeError::NonPositivePrice`] before any store access; nothing
    /// is written on a validation failure.
    async fn submit(
        &self,
        candidate: StockCandidate,
        added_by: &str,
    ) -> Result<SubmitReceipt, IntakeError>;
}
