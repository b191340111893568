use sea_orm::*;
use uuid::Uuid;

use crate::models::orders::{self, CreateOrder, Status};

/// Insert a new order (defaults to Pending status).
pub async fn insert_order(
    db: &DatabaseConnection,
    client_id: Uuid,
    input: CreateOrder,
) -> Result<orders::Model, DbErr> {
    let new_order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        shop_id: Set(input.shop_id),
        item_name: Set(input.item_name),
        quantity: Set(input.quantity),
        total_price: Set(input.total_price),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_order.insert(db).await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// Fetch orders placed by a client, newest first.
pub async fn get_orders_by_client_id(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::ClientId.eq(client_id))
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch orders received by a shop, newest first.
pub async fn get_orders_by_shop_id(
    db: &DatabaseConnection,
    shop_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::ShopId.eq(shop_id))
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Update the status of an order.
pub async fn update_order_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<orders::Model, DbErr> {
    let order = orders::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Order not found".to_string()))?;

    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);

    active.update(db).await
}
