use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::orders as order_db;
use crate::db::users as user_db;
use crate::models::orders::{CreateOrder, UpdateOrderStatus};
use crate::models::users::Roles;

/// POST /api/orders — a client places an order with an equipment shop.
pub async fn create_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateOrder>,
) -> impl Responder {
    let client_id = user.0.id;
    let input = body.into_inner();

    if input.quantity < 1 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Quantity must be at least 1",
        }));
    }

    if input.shop_id == client_id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot order from yourself",
        }));
    }

    // Verify the target is an actual shop account.
    match user_db::get_user_by_id(db.get_ref(), input.shop_id).await {
        Ok(Some(shop)) if shop.role == Roles::Shop => {}
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Target user is not a shop",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("User {} not found", input.shop_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match order_db::insert_order(db.get_ref(), client_id, input).await {
        Ok(order) => HttpResponse::Created().json(order),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create order: {e}"),
        })),
    }
}

/// GET /api/orders — list orders relevant to the authenticated user, as
/// client and as shop.
pub async fn get_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let user_id = user.0.id;

    let as_client = match order_db::get_orders_by_client_id(db.get_ref(), user_id).await {
        Ok(orders) => orders,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let as_shop = match order_db::get_orders_by_shop_id(db.get_ref(), user_id).await {
        Ok(orders) => orders,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let mut all_orders = as_client;
    for order in as_shop {
        if !all_orders.iter().any(|o| o.id == order.id) {
            all_orders.push(order);
        }
    }

    HttpResponse::Ok().json(all_orders)
}

/// GET /api/orders/{id} — get a single order (parties only).
pub async fn get_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let order_id = path.into_inner();
    let user_id = user.0.id;

    match order_db::get_order_by_id(db.get_ref(), order_id).await {
        Ok(Some(order)) => {
            if order.client_id != user_id && order.shop_id != user_id {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "You are not a party to this order",
                }));
            }
            HttpResponse::Ok().json(order)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {order_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/orders/{id}/status — move an order along its lifecycle.
/// Only the shop decides.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatus>,
) -> impl Responder {
    let order_id = path.into_inner();
    let next = body.into_inner().status;

    let order = match order_db::get_order_by_id(db.get_ref(), order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Order {order_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if order.shop_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the shop can update an order's status",
        }));
    }

    if !order.status.can_transition(&next) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Cannot move a {:?} order to {:?}", order.status, next),
        }));
    }

    match order_db::update_order_status(db.get_ref(), order_id, next).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update order: {e}"),
        })),
    }
}
