use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::Roles;

/// Which kind of provider a booking is against. Shops take orders instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum BookingService {
    #[sea_orm(string_value = "photographer")]
    Photographer,
    #[sea_orm(string_value = "rental")]
    Rental,
}

impl BookingService {
    /// The account role the booked provider must hold.
    pub fn provider_role(&self) -> Roles {
        match self {
            BookingService::Photographer => Roles::Photographer,
            BookingService::Rental => Roles::Rental,
        }
    }
}

/// Booking status stored as a lowercase string in the database.
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

/// SeaORM entity for the `bookings` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub service: BookingService,
    pub scheduled_for: DateTimeUtc,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
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
        from = "Column::ProviderId",
        to = "super::users::Column::Id"
    )]
    Provider,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub provider_id: Uuid,
    pub service: BookingService,
    pub scheduled_for: chrono::DateTime<chrono::Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn lifecycle_transitions() {
        assert!(Status::Pending.can_transition(&Status::Accepted));
        assert!(Status::Pending.can_transition(&Status::Rejected));
        assert!(Status::Accepted.can_transition(&Status::Completed));

        assert!(!Status::Pending.can_transition(&Status::Completed));
        assert!(!Status::Rejected.can_transition(&Status::Accepted));
        assert!(!Status::Completed.can_transition(&Status::Pending));
    }
}
