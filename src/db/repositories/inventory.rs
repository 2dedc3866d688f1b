use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::inventory;
use crate::models::entry::NewStockEntry;
use crate::models::user::Role;

pub struct InventoryRepository {
    conn: DatabaseConnection,
}

impl InventoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert one receipt atomically and return the assigned id. The entry
    /// carries plain scalars only; no partial row survives a failure.
    pub async fn insert(&self, entry: &NewStockEntry) -> Result<i32> {
        let txn = self.conn.begin().await?;

        let active = inventory::ActiveModel {
            item_master_id: Set(entry.item_master_id.clone()),
            item_description: Set(entry.item_description.clone()),
            grade_name: Set(entry.grade_name.clone()),
            group1_name: Set(entry.group1_name.clone()),
            group2_name: Set(entry.group2_name.clone()),
            section_name: Set(entry.section_name.clone()),
            unit_weight: Set(entry.unit_weight),
            source: Set(entry.source.clone()),
            vendor_name: Set(entry.vendor_name.clone()),
            make: Set(entry.make.clone()),
            vehicle_number: Set(entry.vehicle_number.clone()),
            invoice_date: Set(entry.invoice_date.clone()),
            project_name: Set(entry.project_name.clone()),
            thickness: Set(entry.thickness),
            length: Set(entry.length),
            width: Set(entry.width),
            qr_code: Set(entry.qr_code.clone()),
            snapshot: Set(entry.snapshot.clone()),
            latitude: Set(entry.latitude),
            longitude: Set(entry.longitude),
            rack: Set(entry.rack),
            shelf: Set(entry.shelf),
            quantity: Set(entry.quantity),
            price: Set(entry.price),
            stock_date: Set(entry.stock_date.clone()),
            added_by: Set(entry.added_by.clone()),
            ..Default::default()
        };

        let model = active
            .insert(&txn)
            .await
            .context("Failed to insert stock entry")?;

        txn.commit().await?;

        info!(
            id = model.id,
            item = %model.item_master_id,
            added_by = %model.added_by,
            "Recorded stock entry"
        );
        Ok(model.id)
    }

    /// Every receipt, newest first.
    pub async fn list_all(&self) -> Result<Vec<inventory::Model>> {
        let rows = inventory::Entity::find()
            .order_by_desc(inventory::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list stock entries")?;

        Ok(rows)
    }

    /// Creator of a receipt, if the row exists.
    pub async fn added_by(&self, id: i32) -> Result<Option<String>> {
        let row = inventory::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query stock entry")?;

        Ok(row.map(|r| r.added_by))
    }

    /// Delete one receipt. The row goes away only when the actor is an
    /// admin or owns it; otherwise zero rows are affected.
    pub async fn delete_filtered(
        &self,
        id: i32,
        acting_username: &str,
        acting_role: Role,
    ) -> Result<u64> {
        let mut condition = Condition::all().add(inventory::Column::Id.eq(id));
        if !acting_role.is_admin() {
            condition = condition.add(inventory::Column::AddedBy.eq(acting_username));
        }

        let result = inventory::Entity::delete_many()
            .filter(condition)
            .exec(&self.conn)
            .await
            .context("Failed to delete stock entry")?;

        if result.rows_affected > 0 {
            info!(id = id, by = %acting_username, "Deleted stock entry");
        }
        Ok(result.rows_affected)
    }

    /// Delete every receipt whose id falls in the inclusive range. Range
    /// order and the admin guard are enforced by the ledger service.
    pub async fn delete_range(&self, start_id: i32, end_id: i32) -> Result<u64> {
        let result = inventory::Entity::delete_many()
            .filter(inventory::Column::Id.between(start_id, end_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete stock entry range")?;

        info!(
            start = start_id,
            end = end_id,
            affected = result.rows_affected,
            "Deleted stock entry range"
        );
        Ok(result.rows_affected)
    }
}
