use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, CreateProfile, UpdateProfile};

/// Insert a new photographer profile.
pub async fn insert_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: CreateProfile,
) -> Result<profiles::Model, DbErr> {
    let new_profile = profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_name: Set(input.company_name),
        description: Set(input.description),
        created_at: Set(chrono::Utc::now()),
    };

    new_profile.insert(db).await
}

/// Fetch all photographer profiles.
pub async fn get_all_profiles(db: &DatabaseConnection) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find().all(db).await
}

/// Fetch a single profile by ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Fetch a profile by its unique company name.
pub async fn get_profile_by_company_name(
    db: &DatabaseConnection,
    company_name: &str,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::CompanyName.eq(company_name))
        .one(db)
        .await
}

/// Fetch the profile owned by a given user, if any.
pub async fn get_profile_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Update an existing profile.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(company_name) = input.company_name {
        active.company_name = Set(company_name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }

    active.update(db).await
}

/// Delete a profile by ID.
pub async fn delete_profile(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    profiles::Entity::delete_by_id(id).exec(db).await
}
