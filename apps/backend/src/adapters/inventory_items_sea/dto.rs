//! DTOs for inventory_items_sea adapter.

/// DTO for inserting an inventory row; the store assigns the id.
#[derive(Debug, Clone)]
pub struct InventoryItemCreate {
    pub article_number: String,
    pub name: String,
    pub quantity: i32,
    pub location: String,
    pub supplier: String,
}
