use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::chat::access;
use crate::chat::protocol::ServerMessage;
use crate::chat::server::ChatServer;
use crate::db::chats as chat_db;
use crate::db::messages as message_db;
use crate::db::profiles as profile_db;
use crate::error::ApiError;
use crate::models::chats::{
    ChatListQuery, ChatResponse, ChatSummary, ChatType, CreateChat, CreateChatRequest,
};
use crate::models::messages::{MessageResponse, SendMessageRequest};
use crate::models::users::Roles;

/// POST /api/chats — look up or start a conversation with a provider.
///
/// The requester becomes the chat's client side. Photographer chats address
/// the provider by profile company name, shop/rental chats by user id.
/// Returns 200 with the existing chat when the participant pair already has
/// one, 201 when a chat was created.
pub async fn create_or_get_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let chat_type = ChatType::parse(&body.chat_type).ok_or_else(|| {
        ApiError::bad_request(format!("Unrecognized chat type: {}", body.chat_type))
    })?;

    let (provider_id, provider_name) = access::resolve_provider(
        db.get_ref(),
        &chat_type,
        body.company_name.as_deref(),
        body.user_id,
    )
    .await?;

    let (chat, created) = chat_db::find_or_create(
        db.get_ref(),
        CreateChat {
            client_id: user.0.id,
            chat_type,
            provider_id,
            provider_name,
        },
    )
    .await?;

    let messages = message_db::get_messages_by_chat(db.get_ref(), chat.id).await?;
    let response = ChatResponse::from_parts(chat, messages);

    if created {
        tracing::info!(chat_id = %response.id, "chat created");
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

/// GET /api/chats/{id} — fetch the full chat document, message log included.
///
/// Only the two participants may read it. For photographer chats the
/// snapshotted company name must still resolve to a live profile.
pub async fn get_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let chat_id = path.into_inner();

    let chat = chat_db::find_by_id(db.get_ref(), chat_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat {chat_id} not found")))?;

    if !access::can_view(&chat, user.0.id) {
        return Err(ApiError::forbidden(
            "You are not a participant in this chat",
        ));
    }

    if chat.chat_type == ChatType::Photographer {
        profile_db::get_profile_by_company_name(db.get_ref(), &chat.provider_name)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "Photographer profile {} no longer exists",
                    chat.provider_name
                ))
            })?;
    }

    let messages = message_db::get_messages_by_chat(db.get_ref(), chat_id).await?;

    Ok(HttpResponse::Ok().json(ChatResponse::from_parts(chat, messages)))
}

/// POST /api/chats/{id}/messages — append a message to the chat's log.
///
/// The declared sender must be exactly the role the requester is authorized
/// to post as. After the store accepts the append, the message is mirrored
/// to every live subscriber of the chat's room.
pub async fn send_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let chat_id = path.into_inner();
    let body = body.into_inner();

    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("Message content cannot be empty"));
    }

    let chat = chat_db::find_by_id(db.get_ref(), chat_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat {chat_id} not found")))?;

    let role = access::posting_role(&chat, &user.0)?;

    if body.sender != role {
        return Err(ApiError::forbidden(
            "Declared sender does not match your role in this chat",
        ));
    }

    let saved = message_db::append_message(db.get_ref(), chat_id, role, body.content).await?;

    // Persist first, broadcast second — subscribers only ever see messages
    // the store has durably accepted.
    chat_server
        .broadcast(chat_id, ServerMessage::new_message(&saved))
        .await;

    Ok(HttpResponse::Created().json(MessageResponse::from(saved)))
}

/// GET /api/chats?role={client|photographer|shop|rental} — list the
/// requester's chats under that role, most recently updated first.
///
/// A client listing spans all chat types; a provider listing only contains
/// chats of that provider's own type.
pub async fn list_chats(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ChatListQuery>,
) -> Result<HttpResponse, ApiError> {
    let role = Roles::parse(&query.role)
        .ok_or_else(|| ApiError::bad_request(format!("Unrecognized role: {}", query.role)))?;

    let chats = chat_db::list_by_participant(db.get_ref(), user.0.id, role).await?;

    let chat_ids: Vec<Uuid> = chats.iter().map(|c| c.id).collect();
    let mut latest = message_db::get_latest_messages_for_chats(db.get_ref(), chat_ids).await?;

    let summaries: Vec<ChatSummary> = chats
        .into_iter()
        .map(|chat| {
            let last = latest.remove(&chat.id);
            ChatSummary {
                id: chat.id,
                chat_type: chat.chat_type,
                client_id: chat.client_id,
                provider_id: chat.provider_id,
                provider_name: chat.provider_name,
                last_message: last.as_ref().map(|m| m.content.clone()),
                last_message_at: last.map(|m| m.created_at),
                updated_at: chat.updated_at,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}
