use sea_orm::entity::prelude::*;

pub const TABLE: &str = "inventory_items";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "article_number", indexed)]
    pub article_number: String,
    #[sea_orm(column_name = "name", default_value = "")]
    pub name: String,
    #[sea_orm(column_name = "quantity", default_value = 0)]
    pub quantity: i32,
    #[sea_orm(column_name = "location", default_value = "")]
    pub location: String,
    #[sea_orm(column_name = "supplier", default_value = "")]
    pub supplier: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
