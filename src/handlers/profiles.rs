use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::profiles as profile_db;
use crate::models::profiles::{CreateProfile, UpdateProfile};
use crate::models::users::Roles;

/// POST /api/profiles — create the authenticated photographer's provider
/// profile. One profile per photographer; the company name is the public
/// handle clients open chats with, so it must be unused.
pub async fn create_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProfile>,
) -> impl Responder {
    if user.0.role != Roles::Photographer {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only photographer accounts can create a profile",
        }));
    }

    let mut input = body.into_inner();
    input.company_name = input.company_name.trim().to_string();
    if input.company_name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "company_name cannot be empty",
        }));
    }

    match profile_db::get_profile_by_user_id(db.get_ref(), user.0.id).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You already have a profile",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    match profile_db::get_profile_by_company_name(db.get_ref(), &input.company_name).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Company name {} is already taken", input.company_name),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    match profile_db::insert_profile(db.get_ref(), user.0.id, input).await {
        Ok(profile) => HttpResponse::Created().json(profile),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create profile: {e}"),
        })),
    }
}

/// GET /api/profiles — list all photographer profiles.
pub async fn get_profiles(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match profile_db::get_all_profiles(db.get_ref()).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/profiles/{id} — get a single profile (cached).
pub async fn get_profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::profile(&id.to_string());

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => {
            let _ = cache.set(&cache_key, &profile, Some(600)).await;
            HttpResponse::Ok().json(profile)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/profiles/company/{company_name} — look a profile up by its
/// public company name (the same resolution chat creation uses).
pub async fn get_profile_by_company(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<String>,
) -> impl Responder {
    let company_name = path.into_inner();
    let cache_key = keys::profile_company(&company_name);

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match profile_db::get_profile_by_company_name(db.get_ref(), &company_name).await {
        Ok(Some(profile)) => {
            let _ = cache.set(&cache_key, &profile, Some(600)).await;
            HttpResponse::Ok().json(profile)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("No profile named {company_name}"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/profiles/{id} — update a profile (owner only).
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfile>,
) -> impl Responder {
    let id = path.into_inner();

    let existing = match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if existing.user_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this profile",
        }));
    }

    match profile_db::update_profile(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            // Invalidate both lookup paths, including the pre-rename company key.
            let _ = cache.delete(&keys::profile(&id.to_string())).await;
            let _ = cache
                .delete(&keys::profile_company(&existing.company_name))
                .await;
            let _ = cache
                .delete(&keys::profile_company(&updated.company_name))
                .await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update profile: {e}"),
        })),
    }
}

/// DELETE /api/profiles/{id} — delete a profile (owner only).
pub async fn delete_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let existing = match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if existing.user_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this profile",
        }));
    }

    match profile_db::delete_profile(db.get_ref(), id).await {
        Ok(_) => {
            let _ = cache.delete(&keys::profile(&id.to_string())).await;
            let _ = cache
                .delete(&keys::profile_company(&existing.company_name))
                .await;
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Profile {id} deleted"),
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete profile: {e}"),
        })),
    }
}
