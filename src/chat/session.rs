use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::jwt::TokenVerifier;
use crate::chat::access;
use crate::chat::protocol::{ClientMessage, ServerMessage};
use crate::chat::server::{ChatServer, ClientHandle};
use crate::db::chats as chat_db;
use crate::db::messages as message_db;
use crate::db::users::find_or_create_from_auth;
use crate::models::users::{self, CreateUserFromAuth, Roles};

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/chats/ws?token=<jwt>
///
/// Upgrades the HTTP connection to a WebSocket. Authenticates via query
/// param token (browsers can't send Authorization headers during the
/// WebSocket handshake). Chat subscriptions are established per-chat via
/// `join_chat` events, each authorized against the chat's participants.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
    db: web::Data<DatabaseConnection>,
    verifier: web::Data<Arc<TokenVerifier>>,
    chat_server: web::Data<Arc<ChatServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    // 1. Validate the JWT.
    let claims = verifier
        .validate(&query.token)
        .await
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;

    let email = claims
        .user_email()
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("No email in token claims"))?;

    // 2. Resolve the local user row, creating it on first contact just like
    //    the REST extractor does.
    let user = find_or_create_from_auth(
        db.get_ref(),
        CreateUserFromAuth {
            id: user_id,
            email,
            display_name: claims.display_name(),
            avatar_url: claims.avatar_url(),
            auth_provider: "oidc".to_string(),
            role: Roles::Client,
        },
    )
    .await
    .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?;

    // 3. Upgrade to WebSocket.
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    // 4. Wire up the outgoing channel for this connection.
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = ClientHandle {
        conn_id: Uuid::new_v4(),
        user_id: user.id,
        sender: tx,
    };

    // 5. Spawn the WebSocket session task.
    let db_clone = db.get_ref().clone();
    let chat_server_clone = chat_server.get_ref().clone();

    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        handle,
        user,
        db_clone,
        chat_server_clone,
    ));

    Ok(response)
}

/// Drives the WebSocket session: reads incoming events from the client,
/// forwards outgoing broadcasts from the chat server, and handles cleanup
/// on disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    handle: ClientHandle,
    user: users::Model,
    db: DatabaseConnection,
    chat_server: Arc<ChatServer>,
) {
    loop {
        tokio::select! {
            // Incoming message from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        handle_client_message(
                            &text,
                            &mut session,
                            &handle,
                            &user,
                            &db,
                            &chat_server,
                        )
                        .await;
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Outgoing message from the chat server to this client.
            Some(server_msg) = rx.recv() => {
                let json = match serde_json::to_string(&server_msg) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    // Clean up: drop every room subscription this connection held.
    chat_server.leave_all(handle.conn_id).await;
    let _ = session.close(None).await;
}

/// Parse and handle an incoming client event. Failures are reported to this
/// connection only, as `error` events; the connection stays open.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    handle: &ClientHandle,
    user: &users::Model,
    db: &DatabaseConnection,
    chat_server: &ChatServer,
) {
    let client_msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            send_error(session, format!("Invalid message format: {e}")).await;
            return;
        }
    };

    match client_msg {
        ClientMessage::JoinChat { chat_id } => {
            let chat = match chat_db::find_by_id(db, chat_id).await {
                Ok(Some(chat)) => chat,
                Ok(None) => {
                    send_error(session, format!("Chat {chat_id} not found")).await;
                    return;
                }
                Err(e) => {
                    send_error(session, format!("Database error: {e}")).await;
                    return;
                }
            };

            if !access::can_view(&chat, handle.user_id) {
                send_error(session, "You are not a participant in this chat".to_string()).await;
                return;
            }

            chat_server.join(chat_id, handle.clone()).await;
        }

        ClientMessage::SendMessage { chat_id, content } => {
            if content.trim().is_empty() {
                send_error(session, "Message content cannot be empty".to_string()).await;
                return;
            }

            let chat = match chat_db::find_by_id(db, chat_id).await {
                Ok(Some(chat)) => chat,
                Ok(None) => {
                    send_error(session, format!("Chat {chat_id} not found")).await;
                    return;
                }
                Err(e) => {
                    send_error(session, format!("Database error: {e}")).await;
                    return;
                }
            };

            // Same rule as the REST path: the sender role is derived from
            // the authenticated user, never from the payload.
            let sender = match access::posting_role(&chat, user) {
                Ok(role) => role,
                Err(e) => {
                    send_error(session, e.to_string()).await;
                    return;
                }
            };

            // Persist first, broadcast second: subscribers must never see a
            // message the store did not accept.
            match message_db::append_message(db, chat_id, sender, content).await {
                Ok(saved) => {
                    chat_server
                        .broadcast(chat_id, ServerMessage::new_message(&saved))
                        .await;
                }
                Err(e) => {
                    send_error(session, format!("Failed to save message: {e}")).await;
                }
            }
        }
    }
}

async fn send_error(session: &mut actix_ws::Session, message: String) {
    let err = ServerMessage::error(message);
    let _ = session
        .text(serde_json::to_string(&err).unwrap_or_default())
        .await;
}
