use axum::{Json, extract::State};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::current_user;
use super::{ApiError, ApiResponse, AppState};
use crate::models::draft::EntryDraft;
use crate::models::entry::{Coordinates, Source, StockCandidate};
use crate::services::SubmitReceipt;

/// Session key the transient capture state is stored under.
const SESSION_DRAFT_KEY: &str = "draft";

#[derive(Deserialize)]
pub struct CaptureRequest {
    pub qr_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub item_master_id: String,
    #[serde(default)]
    pub source: Source,
    pub vendor_name: Option<String>,
    pub make: Option<String>,
    pub vehicle_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub project_name: Option<String>,
    pub thickness: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub rack: Option<i32>,
    pub shelf: Option<i32>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub stock_date: Option<NaiveDate>,
    /// Direct values win over the session draft when both are present.
    pub qr_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Base64-encoded photo bytes from the camera widget.
    pub snapshot_base64: Option<String>,
}

/// A GPS fix is only usable as a pair.
fn coordinate_pair(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, ApiError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates {
            latitude,
            longitude,
        })),
        (None, None) => Ok(None),
        _ => Err(ApiError::validation(
            "Latitude and longitude must be captured together",
        )),
    }
}

async fn load_draft(session: &Session) -> Result<EntryDraft, ApiError> {
    Ok(session
        .get::<EntryDraft>(SESSION_DRAFT_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .unwrap_or_default())
}

async fn store_draft(session: &Session, draft: &EntryDraft) -> Result<(), ApiError> {
    session
        .insert(SESSION_DRAFT_KEY, draft)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /intake/capture
/// Record scanned QR / captured GPS values onto the session draft.
pub async fn capture(
    session: Session,
    Json(payload): Json<CaptureRequest>,
) -> Result<Json<ApiResponse<EntryDraft>>, ApiError> {
    current_user(&session).await?;

    let mut draft = load_draft(&session).await?;

    if let Some(qr_code) = payload.qr_code {
        draft.qr_code = Some(qr_code);
    }
    if let Some(coordinates) = coordinate_pair(payload.latitude, payload.longitude)? {
        draft.coordinates = Some(coordinates);
    }

    store_draft(&session, &draft).await?;
    Ok(Json(ApiResponse::success(draft)))
}

/// GET /intake/draft
pub async fn get_draft(session: Session) -> Result<Json<ApiResponse<EntryDraft>>, ApiError> {
    current_user(&session).await?;
    let draft = load_draft(&session).await?;
    Ok(Json(ApiResponse::success(draft)))
}

/// POST /intake/submit
/// Validate and persist one stock receipt. On success the session draft is
/// cleared so the next entry starts blank.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<ApiResponse<SubmitReceipt>>, ApiError> {
    let user = current_user(&session).await?;
    let mut draft = load_draft(&session).await?;

    let coordinates = coordinate_pair(payload.latitude, payload.longitude)?
        .or(draft.coordinates);
    let qr_code = payload.qr_code.or_else(|| draft.qr_code.clone());

    let photo = payload
        .snapshot_base64
        .as_deref()
        .map(|encoded| BASE64.decode(encoded))
        .transpose()
        .map_err(|_| ApiError::validation("Invalid snapshot encoding"))?;

    let candidate = StockCandidate {
        item_master_id: payload.item_master_id,
        source: payload.source,
        vendor_name: payload.vendor_name,
        make: payload.make,
        vehicle_number: payload.vehicle_number,
        invoice_date: payload.invoice_date,
        project_name: payload.project_name,
        thickness: payload.thickness,
        length: payload.length,
        width: payload.width,
        qr_code,
        coordinates,
        rack: payload.rack,
        shelf: payload.shelf,
        quantity: payload.quantity,
        price: payload.price,
        stock_date: payload.stock_date,
        photo,
    };

    let receipt = state.intake().submit(candidate, &user.username).await?;

    draft.clear();
    store_draft(&session, &draft).await?;

    Ok(Json(ApiResponse::success(receipt)))
}
