//! Repository layer: domain types over the SeaORM adapters, errors as `DomainError`.

pub mod inventory_items;
