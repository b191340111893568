use sea_orm::*;
use uuid::Uuid;

use crate::models::bookings::{self, CreateBooking, Status};

/// Insert a new booking (defaults to Pending status).
pub async fn insert_booking(
    db: &DatabaseConnection,
    client_id: Uuid,
    input: CreateBooking,
) -> Result<bookings::Model, DbErr> {
    let new_booking = bookings::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        provider_id: Set(input.provider_id),
        service: Set(input.service),
        scheduled_for: Set(input.scheduled_for),
        note: Set(input.note),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_booking.insert(db).await
}

/// Fetch a single booking by ID.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<bookings::Model>, DbErr> {
    bookings::Entity::find_by_id(id).one(db).await
}

/// Fetch bookings made by a client, newest first.
pub async fn get_bookings_by_client_id(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::ClientId.eq(client_id))
        .order_by_desc(bookings::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch bookings received by a provider, newest first.
pub async fn get_bookings_by_provider_id(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::ProviderId.eq(provider_id))
        .order_by_desc(bookings::Column::CreatedAt)
        .all(db)
        .await
}

/// Update the status of a booking.
pub async fn update_booking_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
) -> Result<bookings::Model, DbErr> {
    let booking = bookings::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Booking not found".to_string()))?;

    let mut active: bookings::ActiveModel = booking.into();
    active.status = Set(status);

    active.update(db).await
}
