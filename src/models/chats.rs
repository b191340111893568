use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::messages::{MessageResponse, SenderRole};
use super::users::Roles;

/// The provider side of a conversation, fixed at creation. Stored as a
/// lowercase string; determines which authorization rules apply and which
/// role the provider posts as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    #[sea_orm(string_value = "photographer")]
    Photographer,
    #[sea_orm(string_value = "shop")]
    Shop,
    #[sea_orm(string_value = "rental")]
    Rental,
}

impl ChatType {
    /// Parse a chat type label from request input. Case and surrounding
    /// whitespace are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "photographer" => Some(ChatType::Photographer),
            "shop" => Some(ChatType::Shop),
            "rental" => Some(ChatType::Rental),
            _ => None,
        }
    }

    /// The account role the provider participant must hold.
    pub fn provider_role(&self) -> Roles {
        match self {
            ChatType::Photographer => Roles::Photographer,
            ChatType::Shop => Roles::Shop,
            ChatType::Rental => Roles::Rental,
        }
    }

    /// The sender label the provider participant posts under.
    pub fn sender_role(&self) -> SenderRole {
        match self {
            ChatType::Photographer => SenderRole::Photographer,
            ChatType::Shop => SenderRole::Shop,
            ChatType::Rental => SenderRole::Rental,
        }
    }
}

/// SeaORM entity for the `chats` table.
///
/// A chat is a conversation between exactly one client and one provider of a
/// fixed type. `provider_name` is a snapshot of the provider's display name
/// taken at creation time; it is intentionally not kept in sync with later
/// renames. `updated_at` is bumped on every message append so chat lists can
/// be ordered by most recent activity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub chat_type: ChatType,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/chats`. `company_name` addresses a photographer by
/// their profile's company name; `user_id` addresses a shop or rental
/// provider directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatRequest {
    #[serde(rename = "type")]
    pub chat_type: String,
    pub company_name: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Resolved chat-creation input (used internally by the chat store).
#[derive(Debug, Clone)]
pub struct CreateChat {
    pub client_id: Uuid,
    pub chat_type: ChatType,
    pub provider_id: Uuid,
    pub provider_name: String,
}

/// Full chat document, including the ordered message log.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub messages: Vec<MessageResponse>,
}

impl ChatResponse {
    pub fn from_parts(chat: Model, messages: Vec<super::messages::Model>) -> Self {
        Self {
            id: chat.id,
            chat_type: chat.chat_type,
            client_id: chat.client_id,
            provider_id: chat.provider_id,
            provider_name: chat.provider_name,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        }
    }
}

/// One row of the `GET /api/chats?role=` listing.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
}

/// Query parameters for the chat listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatListQuery {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(ChatType::parse("  Shop "), Some(ChatType::Shop));
        assert_eq!(ChatType::parse("PHOTOGRAPHER"), Some(ChatType::Photographer));
        assert_eq!(ChatType::parse("rental"), Some(ChatType::Rental));
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(ChatType::parse("client"), None);
        assert_eq!(ChatType::parse("studio"), None);
        assert_eq!(ChatType::parse(""), None);
    }

    #[test]
    fn provider_role_matches_type() {
        assert_eq!(ChatType::Photographer.provider_role(), Roles::Photographer);
        assert_eq!(ChatType::Shop.provider_role(), Roles::Shop);
        assert_eq!(ChatType::Rental.provider_role(), Roles::Rental);
    }
}
