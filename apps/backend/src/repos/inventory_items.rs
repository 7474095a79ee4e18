//! Repository layer for inventory items.
//!
//! Every lookup is by article number. Article numbers are not unique in the
//! store; when several rows share one, the row with the lowest id is the one
//! read, updated or deleted.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::adapters::inventory_items_sea as adapter;
use crate::entities::inventory_items;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i32,
    pub article_number: String,
    pub name: String,
    pub quantity: i32,
    pub location: String,
    pub supplier: String,
}

/// Creation input. Any client-sent id is not part of this shape and therefore ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub article_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub supplier: String,
}

impl From<inventory_items::Model> for InventoryItem {
    fn from(model: inventory_items::Model) -> Self {
        Self {
            id: model.id,
            article_number: model.article_number,
            name: model.name,
            quantity: model.quantity,
            location: model.location,
            supplier: model.supplier,
        }
    }
}

impl From<NewInventoryItem> for adapter::InventoryItemCreate {
    fn from(item: NewInventoryItem) -> Self {
        Self {
            article_number: item.article_number,
            name: item.name,
            quantity: item.quantity,
            location: item.location,
            supplier: item.supplier,
        }
    }
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<InventoryItem>, DomainError> {
    let rows = adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(InventoryItem::from).collect())
}

pub async fn find_by_article_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article_number: &str,
) -> Result<Option<InventoryItem>, DomainError> {
    let row = adapter::find_by_article_number(conn, article_number).await?;
    Ok(row.map(InventoryItem::from))
}

pub async fn require_by_article_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article_number: &str,
) -> Result<InventoryItem, DomainError> {
    find_by_article_number(conn, article_number)
        .await?
        .ok_or_else(|| DomainError::item_not_found(article_number))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    item: NewInventoryItem,
) -> Result<InventoryItem, DomainError> {
    let row = adapter::create_item(conn, item.into()).await?;
    Ok(row.into())
}

pub async fn update_quantity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article_number: &str,
    quantity: i32,
) -> Result<InventoryItem, DomainError> {
    let existing = adapter::find_by_article_number(conn, article_number)
        .await?
        .ok_or_else(|| DomainError::item_not_found(article_number))?;
    let updated = adapter::set_quantity(conn, existing, quantity).await?;
    Ok(updated.into())
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article_number: &str,
) -> Result<(), DomainError> {
    let existing = adapter::find_by_article_number(conn, article_number)
        .await?
        .ok_or_else(|| DomainError::item_not_found(article_number))?;
    adapter::delete_item(conn, existing).await?;
    Ok(())
}
