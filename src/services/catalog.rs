//! Item-master lookup. The catalog is read-only reference data; the core
//! never writes to it and receipts copy the selected row instead of keeping
//! a live reference.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::entry::CatalogItem;
use crate::services::normalize::{scalar_number, scalar_text};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item master file not found: {0}")]
    MasterFileMissing(String),

    #[error("Failed to parse item master: {0}")]
    Parse(String),
}

/// Read-only item-master source.
pub trait CatalogSource: Send + Sync {
    /// Point-in-time copy of the row with the given id.
    fn get(&self, item_master_id: &str) -> Option<CatalogItem>;

    fn list(&self) -> Vec<CatalogItem>;
}

/// One raw row of the exported item master. Cells stay untyped here; the
/// numeric columns routinely arrive as strings in hand-edited exports.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Item Master ID")]
    item_master_id: Value,
    #[serde(rename = "Item Description", default)]
    item_description: Value,
    #[serde(rename = "Grade Name", default)]
    grade_name: Value,
    #[serde(rename = "Group1 Name", default)]
    group1_name: Value,
    #[serde(rename = "Group2 Name", default)]
    group2_name: Value,
    #[serde(rename = "Section Name", default)]
    section_name: Value,
    #[serde(rename = "Unit Wt. (kg/m)", default)]
    unit_weight: Value,
}

/// Catalog adapter backed by a JSON export of the item-master workbook,
/// loaded once at startup.
pub struct JsonCatalog {
    items: Vec<CatalogItem>,
    by_id: HashMap<String, usize>,
}

impl JsonCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| CatalogError::MasterFileMissing(path.display().to_string()))?;

        let rows: Vec<RawRow> =
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let catalog = Self::from_rows(rows);
        info!(
            items = catalog.items.len(),
            path = %path.display(),
            "Loaded item master"
        );
        Ok(catalog)
    }

    fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut items = Vec::with_capacity(rows.len());
        let mut by_id = HashMap::new();

        for row in rows {
            // Rows without an id are unselectable and skipped.
            let Some(item_master_id) = scalar_text(&row.item_master_id) else {
                continue;
            };

            by_id.entry(item_master_id.clone()).or_insert(items.len());
            items.push(CatalogItem {
                item_master_id,
                item_description: scalar_text(&row.item_description),
                grade_name: scalar_text(&row.grade_name),
                group1_name: scalar_text(&row.group1_name),
                group2_name: scalar_text(&row.group2_name),
                section_name: scalar_text(&row.section_name),
                unit_weight: scalar_number(&row.unit_weight),
            });
        }

        Self { items, by_id }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogSource for JsonCatalog {
    fn get(&self, item_master_id: &str) -> Option<CatalogItem> {
        self.by_id
            .get(item_master_id)
            .map(|&idx| self.items[idx].clone())
    }

    fn list(&self) -> Vec<CatalogItem> {
        self.items.clone()
    }
}

/// Fixed in-memory catalog, for tests and for running without a master file.
#[derive(Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    #[must_use]
    pub const fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogSource for StaticCatalog {
    fn get(&self, item_master_id: &str) -> Option<CatalogItem> {
        self.items
            .iter()
            .find(|item| item.item_master_id == item_master_id)
            .cloned()
    }

    fn list(&self) -> Vec<CatalogItem> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<RawRow> {
        serde_json::from_str(
            r#"[
                {
                    "Item Master ID": "IM-001",
                    "Item Description": "MS Plate 6mm",
                    "Grade Name": "E250",
                    "Group1 Name": "Plates",
                    "Group2 Name": "MS",
                    "Section Name": "PLT",
                    "Unit Wt. (kg/m)": 47.1
                },
                {
                    "Item Master ID": 2047,
                    "Item Description": "ISMC 100",
                    "Unit Wt. (kg/m)": "9.56"
                },
                {
                    "Item Master ID": "   ",
                    "Item Description": "row with no usable id"
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_rows_are_normalized_to_scalars() {
        let catalog = JsonCatalog::from_rows(sample_rows());

        let plate = catalog.get("IM-001").unwrap();
        assert_eq!(plate.item_description.as_deref(), Some("MS Plate 6mm"));
        assert_eq!(plate.unit_weight, Some(47.1));

        // Numeric id and string-typed weight both coerce.
        let channel = catalog.get("2047").unwrap();
        assert_eq!(channel.unit_weight, Some(9.56));
        assert_eq!(channel.grade_name, None);
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let catalog = JsonCatalog::from_rows(sample_rows());
        assert_eq!(catalog.list().len(), 2);
    }

    #[test]
    fn test_get_returns_a_copy_not_a_reference() {
        let catalog = JsonCatalog::from_rows(sample_rows());
        let first = catalog.get("IM-001").unwrap();
        let second = catalog.get("IM-001").unwrap();
        assert_eq!(first, second);
    }
}
