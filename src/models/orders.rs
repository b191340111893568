use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl Status {
    /// Valid lifecycle moves: pending → accepted/rejected, accepted → completed.
    pub fn can_transition(&self, next: &Status) -> bool {
        matches!(
            (self, next),
            (Status::Pending, Status::Accepted)
                | (Status::Pending, Status::Rejected)
                | (Status::Accepted, Status::Completed)
        )
    }
}

/// SeaORM entity for the `orders` table. An order snapshots the item name
/// and total price at purchase time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub shop_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub status: Status,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ShopId",
        to = "super::users::Column::Id"
    )]
    Shop,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub shop_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: Status,
}
