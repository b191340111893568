use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::bookings as booking_db;
use crate::db::users as user_db;
use crate::models::bookings::{CreateBooking, UpdateBookingStatus};

/// POST /api/bookings — a client books a photographer or rental provider.
///
/// The client is taken from the JWT. The provider must exist and hold the
/// account role the requested service implies.
pub async fn create_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateBooking>,
) -> impl Responder {
    let client_id = user.0.id;
    let input = body.into_inner();

    if input.provider_id == client_id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot book yourself",
        }));
    }

    // Verify the provider exists and offers the requested service.
    let provider = match user_db::get_user_by_id(db.get_ref(), input.provider_id).await {
        Ok(Some(provider)) => provider,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("User {} not found", input.provider_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if provider.role != input.service.provider_role() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Target user does not offer this service",
        }));
    }

    match booking_db::insert_booking(db.get_ref(), client_id, input).await {
        Ok(booking) => HttpResponse::Created().json(booking),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create booking: {e}"),
        })),
    }
}

/// GET /api/bookings — list bookings relevant to the authenticated user,
/// as client and as provider.
pub async fn get_bookings(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let user_id = user.0.id;

    let as_client = match booking_db::get_bookings_by_client_id(db.get_ref(), user_id).await {
        Ok(bookings) => bookings,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let as_provider = match booking_db::get_bookings_by_provider_id(db.get_ref(), user_id).await {
        Ok(bookings) => bookings,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let mut all_bookings = as_client;
    for booking in as_provider {
        if !all_bookings.iter().any(|b| b.id == booking.id) {
            all_bookings.push(booking);
        }
    }

    HttpResponse::Ok().json(all_bookings)
}

/// GET /api/bookings/{id} — get a single booking (parties only).
pub async fn get_booking(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let booking_id = path.into_inner();
    let user_id = user.0.id;

    match booking_db::get_booking_by_id(db.get_ref(), booking_id).await {
        Ok(Some(booking)) => {
            if booking.client_id != user_id && booking.provider_id != user_id {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "You are not a party to this booking",
                }));
            }
            HttpResponse::Ok().json(booking)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Booking {booking_id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/bookings/{id}/status — move a booking along its lifecycle.
///
/// Only the provider decides: pending bookings can be accepted or rejected,
/// accepted bookings can be completed.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBookingStatus>,
) -> impl Responder {
    let booking_id = path.into_inner();
    let next = body.into_inner().status;

    let booking = match booking_db::get_booking_by_id(db.get_ref(), booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Booking {booking_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if booking.provider_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the provider can update a booking's status",
        }));
    }

    if !booking.status.can_transition(&next) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Cannot move a {:?} booking to {:?}", booking.status, next),
        }));
    }

    match booking_db::update_booking_status(db.get_ref(), booking_id, next).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update booking: {e}"),
        })),
    }
}
