pub mod inventory_items;

pub use inventory_items::Entity as InventoryItems;
pub use inventory_items::Model as InventoryItemRow;
