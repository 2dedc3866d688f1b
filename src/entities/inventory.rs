use sea_orm::entity::prelude::*;

/// One stock receipt. Item-master columns are copied at insert time so the
/// row stays stable if the catalog later changes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub item_master_id: String,

    pub item_description: Option<String>,

    pub grade_name: Option<String>,

    pub group1_name: Option<String>,

    pub group2_name: Option<String>,

    pub section_name: Option<String>,

    /// Unit Wt. (kg/m) from the item master.
    pub unit_weight: Option<f64>,

    /// "Spare RM", "Project Inventory" or "Off-Cut".
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

    /// Path of the persisted snapshot photo, if one was taken.
    pub snapshot: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    pub rack: Option<i32>,

    pub shelf: Option<i32>,

    pub quantity: f64,

    pub price: f64,

    pub stock_date: Option<String>,

    /// Username of the creator. Weak reference; no foreign key.
    pub added_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
