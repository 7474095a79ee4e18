//! SeaORM adapter for the inventory items repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, Order,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::inventory_items;

pub mod dto;

pub use dto::InventoryItemCreate;

/// All rows, oldest first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<inventory_items::Model>, sea_orm::DbErr> {
    inventory_items::Entity::find()
        .order_by(inventory_items::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// First row (lowest id) carrying the article number.
pub async fn find_by_article_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    article_number: &str,
) -> Result<Option<inventory_items::Model>, sea_orm::DbErr> {
    inventory_items::Entity::find()
        .filter(inventory_items::Column::ArticleNumber.eq(article_number))
        .order_by(inventory_items::Column::Id, Order::Asc)
        .one(conn)
        .await
}

pub async fn create_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: InventoryItemCreate,
) -> Result<inventory_items::Model, sea_orm::DbErr> {
    let item = inventory_items::ActiveModel {
        id: NotSet,
        article_number: Set(dto.article_number),
        name: Set(dto.name),
        quantity: Set(dto.quantity),
        location: Set(dto.location),
        supplier: Set(dto.supplier),
    };
    item.insert(conn).await
}

/// Overwrite the quantity of an already-loaded row. Other columns are left untouched.
pub async fn set_quantity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: inventory_items::Model,
    quantity: i32,
) -> Result<inventory_items::Model, sea_orm::DbErr> {
    let mut active: inventory_items::ActiveModel = existing.into();
    active.quantity = Set(quantity);
    active.update(conn).await
}

/// Delete exactly the given row (by primary key).
pub async fn delete_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: inventory_items::Model,
) -> Result<u64, sea_orm::DbErr> {
    let result = existing.delete(conn).await?;
    Ok(result.rows_affected)
}
