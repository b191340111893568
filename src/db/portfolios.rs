use sea_orm::*;
use uuid::Uuid;

use crate::models::portfolios::{self, CreatePortfolio, UpdatePortfolio};

/// Insert a new portfolio item.
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    photographer_id: Uuid,
    input: CreatePortfolio,
) -> Result<portfolios::Model, DbErr> {
    let new_portfolio = portfolios::ActiveModel {
        id: Set(Uuid::new_v4()),
        photographer_id: Set(photographer_id),
        title: Set(input.title),
        description: Set(input.description),
        image_url: Set(input.image_url),
        created_at: Set(chrono::Utc::now()),
    };

    new_portfolio.insert(db).await
}

/// Fetch a single portfolio item by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<portfolios::Model>, DbErr> {
    portfolios::Entity::find_by_id(id).one(db).await
}

/// Fetch all portfolio items for a given photographer, newest first.
pub async fn get_portfolios_by_photographer(
    db: &DatabaseConnection,
    photographer_id: Uuid,
) -> Result<Vec<portfolios::Model>, DbErr> {
    portfolios::Entity::find()
        .filter(portfolios::Column::PhotographerId.eq(photographer_id))
        .order_by_desc(portfolios::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing portfolio item.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdatePortfolio,
) -> Result<portfolios::Model, DbErr> {
    let item = portfolios::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Portfolio item not found".to_string()))?;

    let mut active: portfolios::ActiveModel = item.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(image_url) = input.image_url {
        active.image_url = Set(Some(image_url));
    }

    active.update(db).await
}

/// Delete a portfolio item by ID.
pub async fn delete_portfolio(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    portfolios::Entity::delete_by_id(id).exec(db).await
}
