use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The role a message was posted as. Distinct from the author's account
/// role, but constrained to match it: a provider always posts as their own
/// type, a client always posts as `client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "photographer")]
    Photographer,
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "rental")]
    Rental,
}

/// SeaORM entity for the `messages` table.
///
/// Messages are append-only: there is no update or delete path anywhere in
/// the crate. Insertion order (created_at, id) is the chat's chronological
/// order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender: SenderRole,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chats::Entity",
        from = "Column::ChatId",
        to = "super::chats::Column::Id"
    )]
    Chat,
}

impl Related<super::chats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/chats/{id}/messages`. The declared sender must match
/// the role the requester is authorized to post as.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub sender: SenderRole,
}

/// Response DTO for messages returned over REST and WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender: SenderRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Model> for MessageResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            chat_id: m.chat_id,
            sender: m.sender,
            content: m.content,
            created_at: m.created_at,
        }
    }
}
