//! Default implementation of the `IntakeService` trait.

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::Store;
use crate::models::entry::{NewStockEntry, StockCandidate};
use crate::services::catalog::CatalogSource;
use crate::services::intake_service::{IntakeError, IntakeService, SubmitReceipt};
use crate::services::normalize::optional_text;
use crate::services::snapshot::SnapshotService;

pub struct DefaultIntakeService {
    store: Store,
    catalog: Arc<dyn CatalogSource>,
    snapshots: SnapshotService,
}

impl DefaultIntakeService {
    #[must_use]
    pub const fn new(
        store: Store,
        catalog: Arc<dyn CatalogSource>,
        snapshots: SnapshotService,
    ) -> Self {
        Self {
            store,
            catalog,
            snapshots,
        }
    }
}

#[async_trait]
impl IntakeService for DefaultIntakeService {
    async fn submit(
        &self,
        candidate: StockCandidate,
        added_by: &str,
    ) -> Result<SubmitReceipt, IntakeError> {
        let quantity = match candidate.quantity {
            Some(q) if q > 0.0 => q,
            _ => return Err(IntakeError::NonPositiveQuantity),
        };
        let price = match candidate.price {
            Some(p) if p > 0.0 => p,
            _ => return Err(IntakeError::NonPositivePrice),
        };

        // Snapshot copy of the selected catalog row; the receipt must stay
        // stable if the item master changes later.
        let item = self
            .catalog
            .get(candidate.item_master_id.trim())
            .ok_or_else(|| IntakeError::UnknownItem(candidate.item_master_id.clone()))?;

        let qr_code = optional_text(candidate.qr_code);

        let snapshot = match &candidate.photo {
            Some(bytes) => Some(
                self.snapshots
                    .save(bytes, qr_code.as_deref())
                    .await
                    .map_err(|e| IntakeError::Snapshot(e.to_string()))?,
            ),
            None => None,
        };

        let today = chrono::Local::now().date_naive();
        let stock_date = candidate.stock_date.unwrap_or(today);
        let invoice_date = candidate.invoice_date.unwrap_or(today);

        let entry = NewStockEntry {
            item_master_id: item.item_master_id,
            item_description: item.item_description,
            grade_name: item.grade_name,
            group1_name: item.group1_name,
            group2_name: item.group2_name,
            section_name: item.section_name,
            unit_weight: item.unit_weight,
            source: candidate.source.as_str().to_string(),
            vendor_name: optional_text(candidate.vendor_name),
            make: optional_text(candidate.make),
            vehicle_number: optional_text(candidate.vehicle_number),
            invoice_date: Some(invoice_date.to_string()),
            project_name: optional_text(candidate.project_name),
            thickness: candidate.thickness,
            length: candidate.length,
            width: candidate.width,
            qr_code,
            snapshot,
            latitude: candidate.coordinates.map(|c| c.latitude),
            longitude: candidate.coordinates.map(|c| c.longitude),
            rack: candidate.rack,
            shelf: candidate.shelf,
            quantity,
            price,
            stock_date: Some(stock_date.to_string()),
            added_by: added_by.to_string(),
        };

        let id = self.store.insert_entry(&entry).await?;

        Ok(SubmitReceipt {
            id,
            total_value: quantity * price,
        })
    }
}
