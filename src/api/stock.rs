use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{current_user, require_admin};
use super::validation::validate_entry_id;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::entry::StockEntry;
use crate::services::DeleteOutcome;

#[derive(Deserialize)]
pub struct RangeDeleteRequest {
    pub start_id: i32,
    pub end_id: i32,
}

#[derive(Serialize)]
pub struct RangeDeleteResponse {
    pub affected: u64,
}

/// GET /stock
/// Every receipt, newest first, with `total_value` computed.
pub async fn list_stock(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<StockEntry>>>, ApiError> {
    current_user(&session).await?;

    let entries = state.ledger().list_entries().await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// DELETE /stock/{id}
/// Delete one receipt. Admins may delete any row, users only their own.
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user = current_user(&session).await?;
    let id = validate_entry_id(id)?;

    let outcome = state
        .ledger()
        .delete_entry(id, &user.username, user.role)
        .await?;

    match outcome {
        DeleteOutcome::Deleted => Ok(Json(ApiResponse::success(MessageResponse::new(
            "Entry deleted",
        )))),
        DeleteOutcome::NotFound => Err(ApiError::not_found("Stock entry", id)),
        DeleteOutcome::PermissionDenied => Err(ApiError::Forbidden(
            "Not permitted to delete this entry".to_string(),
        )),
    }
}

/// POST /stock/delete-range
/// Delete every receipt in the inclusive id range. Admin only.
pub async fn delete_range(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RangeDeleteRequest>,
) -> Result<Json<ApiResponse<RangeDeleteResponse>>, ApiError> {
    let user = current_user(&session).await?;
    require_admin(&user)?;

    let affected = state
        .ledger()
        .delete_range(payload.start_id, payload.end_id, user.role)
        .await?;

    tracing::info!(
        start = payload.start_id,
        end = payload.end_id,
        affected = affected,
        by = %user.username,
        "Bulk delete"
    );

    Ok(Json(ApiResponse::success(RangeDeleteResponse { affected })))
}
