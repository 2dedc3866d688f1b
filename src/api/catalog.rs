use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user;
use super::{ApiError, ApiResponse, AppState};
use crate::models::entry::CatalogItem;

/// GET /catalog/items
/// The item master, for the selection dropdown.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<CatalogItem>>>, ApiError> {
    current_user(&session).await?;

    Ok(Json(ApiResponse::success(state.catalog().list())))
}
