pub use super::inventory::Entity as Inventory;
pub use super::users::Entity as Users;
