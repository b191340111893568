use sea_orm::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::chats;
use crate::models::messages::{self, SenderRole};

/// Append a message to a chat's log and bump the chat's modification time.
///
/// Runs in a transaction that takes a row lock on the chat, so concurrent
/// appends against the same chat are serialized and the log's insertion
/// order (and its timestamps) stay monotonic. Appends against different
/// chats do not contend.
///
/// Fails with `DbErr::RecordNotFound` if the chat does not exist.
pub async fn append_message(
    db: &DatabaseConnection,
    chat_id: Uuid,
    sender: SenderRole,
    content: String,
) -> Result<messages::Model, DbErr> {
    let txn = db.begin().await?;

    let chat = chats::Entity::find_by_id(chat_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Chat not found".to_string()))?;

    let now = chrono::Utc::now();

    let saved = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        chat_id: Set(chat_id),
        sender: Set(sender),
        content: Set(content),
        created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let mut active: chats::ActiveModel = chat.into();
    active.updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(saved)
}

/// Fetch a chat's full message log in append order.
pub async fn get_messages_by_chat(
    db: &DatabaseConnection,
    chat_id: Uuid,
) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::ChatId.eq(chat_id))
        .order_by_asc(messages::Column::CreatedAt)
        .order_by_asc(messages::Column::Id)
        .all(db)
        .await
}

/// Get latest messages for many chats in one query and return a
/// chat_id -> message map (used by the chat listing endpoint).
pub async fn get_latest_messages_for_chats(
    db: &DatabaseConnection,
    chat_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, messages::Model>, DbErr> {
    if chat_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = messages::Entity::find()
        .filter(messages::Column::ChatId.is_in(chat_ids))
        .order_by_asc(messages::Column::ChatId)
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .all(db)
        .await?;

    let mut latest: HashMap<Uuid, messages::Model> = HashMap::new();
    let mut seen: HashSet<Uuid> = HashSet::new();

    for row in rows {
        if seen.insert(row.chat_id) {
            latest.insert(row.chat_id, row);
        }
    }

    Ok(latest)
}
