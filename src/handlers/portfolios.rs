use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::portfolios as portfolio_db;
use crate::models::portfolios::{CreatePortfolio, UpdatePortfolio};
use crate::models::users::Roles;

/// POST /api/portfolios — add a portfolio item to the authenticated
/// photographer's showcase.
pub async fn create_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreatePortfolio>,
) -> impl Responder {
    if user.0.role != Roles::Photographer {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only photographer accounts can publish portfolio items",
        }));
    }

    match portfolio_db::insert_portfolio(db.get_ref(), user.0.id, body.into_inner()).await {
        Ok(item) => {
            let _ = cache.delete(&keys::portfolio(&user.0.id.to_string())).await;
            HttpResponse::Created().json(item)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create portfolio item: {e}"),
        })),
    }
}

/// GET /api/portfolios/photographer/{photographer_id} — list a
/// photographer's portfolio (cached).
pub async fn get_portfolios_by_photographer(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let photographer_id = path.into_inner();
    let cache_key = keys::portfolio(&photographer_id.to_string());

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match portfolio_db::get_portfolios_by_photographer(db.get_ref(), photographer_id).await {
        Ok(items) => {
            let _ = cache.set(&cache_key, &items, Some(600)).await;
            HttpResponse::Ok().json(items)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/portfolios/{id} — get a single portfolio item.
pub async fn get_portfolio(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match portfolio_db::get_portfolio_by_id(db.get_ref(), id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Portfolio item {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/portfolios/{id} — update a portfolio item (owner only).
pub async fn update_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePortfolio>,
) -> impl Responder {
    let id = path.into_inner();

    let existing = match portfolio_db::get_portfolio_by_id(db.get_ref(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Portfolio item {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if existing.photographer_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this portfolio item",
        }));
    }

    match portfolio_db::update_portfolio(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache
                .delete(&keys::portfolio(&user.0.id.to_string()))
                .await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update portfolio item: {e}"),
        })),
    }
}

/// DELETE /api/portfolios/{id} — delete a portfolio item (owner only).
pub async fn delete_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let existing = match portfolio_db::get_portfolio_by_id(db.get_ref(), id).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Portfolio item {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if existing.photographer_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this portfolio item",
        }));
    }

    match portfolio_db::delete_portfolio(db.get_ref(), id).await {
        Ok(_) => {
            let _ = cache
                .delete(&keys::portfolio(&user.0.id.to_string()))
                .await;
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Portfolio item {id} deleted"),
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete portfolio item: {e}"),
        })),
    }
}
