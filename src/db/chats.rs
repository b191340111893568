use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use crate::models::chats::{self, ChatType, CreateChat};
use crate::models::users::Roles;

/// Fetch the chat for a (client, provider, type) triple, if one exists.
pub async fn find_by_participants(
    db: &DatabaseConnection,
    client_id: Uuid,
    provider_id: Uuid,
    chat_type: ChatType,
) -> Result<Option<chats::Model>, DbErr> {
    chats::Entity::find()
        .filter(chats::Column::ClientId.eq(client_id))
        .filter(chats::Column::ProviderId.eq(provider_id))
        .filter(chats::Column::ChatType.eq(chat_type))
        .one(db)
        .await
}

/// Fetch a single chat by ID.
pub async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<chats::Model>, DbErr> {
    chats::Entity::find_by_id(id).one(db).await
}

/// Fetch a chat or create it if the participant pair has none yet.
///
/// Returns the chat and whether it was created by this call. Creation is a
/// single `INSERT ... ON CONFLICT DO NOTHING` against the unique
/// (client_id, provider_id, chat_type) index, so two concurrent requests
/// cannot produce two chats: the loser observes the conflict and re-reads
/// the winner's row.
pub async fn find_or_create(
    db: &DatabaseConnection,
    input: CreateChat,
) -> Result<(chats::Model, bool), DbErr> {
    if let Some(existing) =
        find_by_participants(db, input.client_id, input.provider_id, input.chat_type.clone())
            .await?
    {
        return Ok((existing, false));
    }

    let now = chrono::Utc::now();
    let new_chat = chats::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(input.client_id),
        chat_type: Set(input.chat_type.clone()),
        provider_id: Set(input.provider_id),
        provider_name: Set(input.provider_name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let insert = chats::Entity::insert(new_chat)
        .on_conflict(
            OnConflict::columns([
                chats::Column::ClientId,
                chats::Column::ProviderId,
                chats::Column::ChatType,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_with_returning(db)
        .await;

    match insert {
        Ok(chat) => Ok((chat, true)),
        // Lost the creation race — another request inserted the chat between
        // our lookup and our insert. The winner's row is authoritative.
        Err(DbErr::RecordNotInserted) => {
            let existing = find_by_participants(
                db,
                input.client_id,
                input.provider_id,
                input.chat_type,
            )
            .await?
            .ok_or_else(|| DbErr::Custom("chat insert conflicted but no row found".to_string()))?;
            Ok((existing, false))
        }
        Err(e) => Err(e),
    }
}

/// Fetch the chats a user participates in under a given role, most recently
/// updated first.
///
/// A client listing matches `client_id` regardless of chat type; a provider
/// listing matches `provider_id` AND the chat type belonging to that role.
pub async fn list_by_participant(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: Roles,
) -> Result<Vec<chats::Model>, DbErr> {
    let query = match role {
        Roles::Client => chats::Entity::find().filter(chats::Column::ClientId.eq(user_id)),
        Roles::Photographer => provider_chats(user_id, ChatType::Photographer),
        Roles::Shop => provider_chats(user_id, ChatType::Shop),
        Roles::Rental => provider_chats(user_id, ChatType::Rental),
    };

    query
        .order_by_desc(chats::Column::UpdatedAt)
        .all(db)
        .await
}

fn provider_chats(user_id: Uuid, chat_type: ChatType) -> Select<chats::Entity> {
    chats::Entity::find()
        .filter(chats::Column::ProviderId.eq(user_id))
        .filter(chats::Column::ChatType.eq(chat_type))
}
