use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::messages::{self, SenderRole};

// ── Client -> Server messages ──

/// Messages the client sends to the server over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe this connection to a chat's broadcast group.
    JoinChat { chat_id: Uuid },
    /// Post a message into a chat this connection's user participates in.
    SendMessage { chat_id: Uuid, content: String },
}

// ── Server -> Client messages ──

/// Messages the server sends to the client over WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A message was appended to a subscribed chat (echoed to the sender's
    /// own connections too, carrying the server-assigned id and timestamp).
    NewMessage {
        id: Uuid,
        chat_id: Uuid,
        sender: SenderRole,
        content: String,
        created_at: String,
    },
    /// An error occurred; sent only to the connection that caused it.
    Error { message: String },
}

impl ServerMessage {
    /// Build the broadcast event for a freshly persisted message.
    pub fn new_message(m: &messages::Model) -> Self {
        ServerMessage::NewMessage {
            id: m.id,
            chat_id: m.chat_id,
            sender: m.sender.clone(),
            content: m.content.clone(),
            created_at: m.created_at.to_rfc3339(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_tagged_json() {
        let chat_id = Uuid::new_v4();

        let join: ClientMessage =
            serde_json::from_str(&format!(r#"{{"type":"join_chat","chat_id":"{chat_id}"}}"#))
                .unwrap();
        assert!(matches!(join, ClientMessage::JoinChat { chat_id: id } if id == chat_id));

        let send: ClientMessage = serde_json::from_str(&format!(
            r#"{{"type":"send_message","chat_id":"{chat_id}","content":"hi"}}"#
        ))
        .unwrap();
        assert!(matches!(send, ClientMessage::SendMessage { content, .. } if content == "hi"));
    }

    #[test]
    fn unknown_client_message_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"delete_message","chat_id":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn server_messages_serialize_with_type_tag() {
        let err = serde_json::to_value(ServerMessage::error("nope")).unwrap();
        assert_eq!(err["type"], "error");
        assert_eq!(err["message"], "nope");

        let msg = ServerMessage::NewMessage {
            id: Uuid::new_v4(),
            chat_id: Uuid::new_v4(),
            sender: SenderRole::Client,
            content: "hello".to_string(),
            created_at: "2026-07-07T12:00:00+00:00".to_string(),
        };
        let value = serde_json::to_value(msg).unwrap();
        assert_eq!(value["type"], "new_message");
        assert_eq!(value["sender"], "client");
        assert_eq!(value["content"], "hello");
    }
}
