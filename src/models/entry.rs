use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::inventory;

/// Where a receipt came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[default]
    #[serde(rename = "Spare RM")]
    SpareRm,
    #[serde(rename = "Project Inventory")]
    ProjectInventory,
    #[serde(rename = "Off-Cut")]
    OffCut,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpareRm => "Spare RM",
            Self::ProjectInventory => "Project Inventory",
            Self::OffCut => "Off-Cut",
        }
    }
}

/// Captured GPS position. Latitude and longitude only ever travel as a pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Point-in-time copy of one item-master row. Receipts keep these values
/// even if the catalog changes later.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogItem {
    pub item_master_id: String,
    pub item_description: Option<String>,
    pub grade_name: Option<String>,
    pub group1_name: Option<String>,
    pub group2_name: Option<String>,
    pub section_name: Option<String>,
    pub unit_weight: Option<f64>,
}

/// Raw field values for one receipt as collected by the presentation layer,
/// before validation and normalization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StockCandidate {
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
    pub qr_code: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub rack: Option<i32>,
    pub shelf: Option<i32>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub stock_date: Option<NaiveDate>,
    /// Photo bytes from the capture device, if a snapshot was taken.
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
}

/// Column values ready for the storage engine. Plain scalars only; the
/// intake service is the sole producer.
#[derive(Clone, Debug)]
pub struct NewStockEntry {
    pub item_master_id: String,
    pub item_description: Option<String>,
    pub grade_name: Option<String>,
    pub group1_name: Option<String>,
    pub group2_name: Option<String>,
    pub section_name: Option<String>,
    pub unit_weight: Option<f64>,
    pub source: String,
    pub vendor_name: Option<String>,
    pub make: Option<String>,
    pub vehicle_number: Option<String>,
    pub invoice_date: Option<String>,
    pub project_name: Option<String>,
    pub thickness: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub qr_code: Option<String>,
    pub snapshot: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rack: Option<i32>,
    pub shelf: Option<i32>,
    pub quantity: f64,
    pub price: f64,
    pub stock_date: Option<String>,
    pub added_by: String,
}

/// A persisted receipt. `total_value` is derived at read time and never
/// stored.
#[derive(Clone, Debug, Serialize)]
pub struct StockEntry {
    pub id: i32,
    pub item_master_id: String,
    pub item_description: Option<String>,
    pub grade_name: Option<String>,
    pub group1_name: Option<String>,
    pub group2_name: Option<String>,
    pub section_name: Option<String>,
    pub unit_weight: Option<f64>,
    pub source: String,
    pub vendor_name: Option<String>,
    pub make: Option<String>,
    pub vehicle_number: Option<String>,
    pub invoice_date: Option<String>,
    pub project_name: Option<String>,
    pub thickness: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub qr_code: Option<String>,
    pub snapshot: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rack: Option<i32>,
    pub shelf: Option<i32>,
    pub quantity: f64,
    pub price: f64,
    pub stock_date: Option<String>,
    pub added_by: String,
    pub total_value: f64,
}

impl From<inventory::Model> for StockEntry {
    fn from(model: inventory::Model) -> Self {
        Self {
            id: model.id,
            item_master_id: model.item_master_id,
            item_description: model.item_description,
            grade_name: model.grade_name,
            group1_name: model.group1_name,
            group2_name: model.group2_name,
            section_name: model.section_name,
            unit_weight: model.unit_weight,
            source: model.source,
            vendor_name: model.vendor_name,
            make: model.make,
            vehicle_number: model.vehicle_number,
            invoice_date: model.invoice_date,
            project_name: model.project_name,
            thickness: model.thickness,
            length: model.length,
            width: model.width,
            qr_code: model.qr_code,
            snapshot: model.snapshot,
            latitude: model.latitude,
            longitude: model.longitude,
            rack: model.rack,
            shelf: model.shelf,
            quantity: model.quantity,
            price: model.price,
            stock_date: model.stock_date,
            added_by: model.added_by,
            total_value: model.quantity * model.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::SpareRm.as_str(), "Spare RM");
        assert_eq!(Source::ProjectInventory.as_str(), "Project Inventory");
        assert_eq!(Source::OffCut.as_str(), "Off-Cut");
        assert_eq!(Source::default(), Source::SpareRm);
    }

    #[test]
    fn test_source_serde_uses_display_labels() {
        let source: Source = serde_json::from_str("\"Off-Cut\"").unwrap();
        assert_eq!(source, Source::OffCut);
        assert_eq!(
            serde_json::to_string(&Source::ProjectInventory).unwrap(),
            "\"Project Inventory\""
        );
    }

    #[test]
    fn test_total_value_is_derived() {
        let model = inventory::Model {
            id: 7,
            item_master_id: "IM-001".to_string(),
            item_description: None,
            grade_name: None,
            group1_name: None,
            group2_name: None,
            section_name: None,
            unit_weight: None,
            source: "Spare RM".to_string(),
            vendor_name: None,
            make: None,
            vehicle_number: None,
            invoice_date: None,
            project_name: None,
            thickness: None,
            length: None,
            width: None,
            qr_code: None,
            snapshot: None,
            latitude: None,
            longitude: None,
            rack: None,
            shelf: None,
            quantity: 5.0,
            price: 10.0,
            stock_date: None,
            added_by: "alice".to_string(),
        };

        let entry = StockEntry::from(model);
        assert_eq!(entry.total_value, 50.0);
    }
}
