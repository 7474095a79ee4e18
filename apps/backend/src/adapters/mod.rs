//! SeaORM adapters: entity-level queries returning `DbErr`.

pub mod inventory_items_sea;
