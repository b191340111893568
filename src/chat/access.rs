use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::profiles as profile_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::chats::{self, ChatType};
use crate::models::messages::SenderRole;
use crate::models::users::{self, Roles};

/// Whether a user may read a chat: they must be the client or the provider
/// participant. Pure id check; account role does not matter for viewing.
pub fn can_view(chat: &chats::Model, user_id: Uuid) -> bool {
    chat.client_id == user_id || chat.provider_id == user_id
}

/// The sender role a user is allowed to post under in a chat.
///
/// The client participant posts as `client` (and must hold the client
/// account role); the provider participant posts as the chat's type (and
/// must hold the matching account role). Everyone else is denied. This is
/// the single authorization point for message appends — both the REST
/// handler and the WebSocket session go through it.
pub fn posting_role(chat: &chats::Model, user: &users::Model) -> Result<SenderRole, ApiError> {
    if user.id == chat.client_id && user.role == Roles::Client {
        return Ok(SenderRole::Client);
    }

    if user.id == chat.provider_id && user.role == chat.chat_type.provider_role() {
        return Ok(chat.chat_type.sender_role());
    }

    Err(ApiError::forbidden(
        "You are not allowed to post in this chat",
    ))
}

/// Resolve the provider side of a new chat and snapshot its display name.
///
/// Photographers are addressed by their profile's company name; shops and
/// rentals directly by user id. The target must exist and hold the account
/// role the chat type requires.
pub async fn resolve_provider(
    db: &DatabaseConnection,
    chat_type: &ChatType,
    company_name: Option<&str>,
    target_user_id: Option<Uuid>,
) -> Result<(Uuid, String), ApiError> {
    match chat_type {
        ChatType::Photographer => {
            let company_name = company_name
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    ApiError::bad_request("company_name is required for photographer chats")
                })?;

            let profile = profile_db::get_profile_by_company_name(db, company_name)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!("No photographer profile named {company_name}"))
                })?;

            let owner = user_db::get_user_by_id(db, profile.user_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Profile owner no longer exists"))?;

            if owner.role != Roles::Photographer {
                return Err(ApiError::forbidden(
                    "Target profile is not owned by a photographer account",
                ));
            }

            Ok((owner.id, profile.company_name))
        }

        ChatType::Shop | ChatType::Rental => {
            let target = target_user_id.ok_or_else(|| {
                ApiError::bad_request("user_id is required for shop and rental chats")
            })?;

            let user = user_db::get_user_by_id(db, target)
                .await?
                .ok_or_else(|| ApiError::not_found(format!("User {target} not found")))?;

            if user.role != chat_type.provider_role() {
                return Err(ApiError::forbidden(
                    "Target user does not hold the required provider role",
                ));
            }

            Ok((user.id, user.public_name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: Uuid, role: Roles) -> users::Model {
        users::Model {
            id,
            email: format!("{id}@example.com"),
            username: None,
            display_name: None,
            avatar_url: None,
            auth_provider: "oidc".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn chat(client_id: Uuid, provider_id: Uuid, chat_type: ChatType) -> chats::Model {
        let now = Utc::now();
        chats::Model {
            id: Uuid::new_v4(),
            client_id,
            chat_type,
            provider_id,
            provider_name: "Aperture Studio".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn participants_can_view_others_cannot() {
        let client_id = Uuid::new_v4();
        let provider_id = Uuid::new_v4();
        let chat = chat(client_id, provider_id, ChatType::Shop);

        assert!(can_view(&chat, client_id));
        assert!(can_view(&chat, provider_id));
        assert!(!can_view(&chat, Uuid::new_v4()));
    }

    #[test]
    fn client_posts_as_client() {
        let client = user(Uuid::new_v4(), Roles::Client);
        let chat = chat(client.id, Uuid::new_v4(), ChatType::Photographer);

        assert_eq!(posting_role(&chat, &client).unwrap(), SenderRole::Client);
    }

    #[test]
    fn provider_posts_as_chat_type() {
        let shop = user(Uuid::new_v4(), Roles::Shop);
        let chat = chat(Uuid::new_v4(), shop.id, ChatType::Shop);

        assert_eq!(posting_role(&chat, &shop).unwrap(), SenderRole::Shop);
    }

    #[test]
    fn provider_of_wrong_role_is_denied() {
        // A shop account that is the provider reference of a
        // photographer-typed chat must not be able to post.
        let shop = user(Uuid::new_v4(), Roles::Shop);
        let chat = chat(Uuid::new_v4(), shop.id, ChatType::Photographer);

        assert!(posting_role(&chat, &shop).is_err());
    }

    #[test]
    fn client_reference_with_provider_role_is_denied() {
        let impostor = user(Uuid::new_v4(), Roles::Rental);
        let chat = chat(impostor.id, Uuid::new_v4(), ChatType::Rental);

        assert!(posting_role(&chat, &impostor).is_err());
    }

    #[test]
    fn non_participant_is_denied_for_every_type() {
        let outsider = user(Uuid::new_v4(), Roles::Client);

        for chat_type in [ChatType::Photographer, ChatType::Shop, ChatType::Rental] {
            let chat = chat(Uuid::new_v4(), Uuid::new_v4(), chat_type);
            let err = posting_role(&chat, &outsider).unwrap_err();
            assert!(matches!(err, ApiError::Forbidden(_)));
        }
    }
}
