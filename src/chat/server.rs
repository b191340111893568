use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::chat::protocol::ServerMessage;

/// A handle to send messages to one connected WebSocket session.
///
/// `conn_id` identifies the connection (a user may hold several), `user_id`
/// the authenticated account behind it.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub conn_id: Uuid,
    pub user_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Process-wide registry of live WebSocket connections, organized by chat id.
///
/// Built once at startup and shared through app data. A connection
/// subscribes to any number of chats; the REST message handler and the
/// WebSocket session both publish through `broadcast` after the store has
/// accepted an append, so every subscriber sees the same stream regardless
/// of which transport produced it.
pub struct ChatServer {
    /// chat_id -> handles of the connections subscribed to that chat
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe a connection to a chat's broadcast group. Joining a group
    /// the connection is already in is a no-op.
    pub async fn join(&self, chat_id: Uuid, handle: ClientHandle) {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(chat_id).or_insert_with(Vec::new);

        if room.iter().any(|c| c.conn_id == handle.conn_id) {
            return;
        }

        room.push(handle);
    }

    /// Remove a connection from every broadcast group it joined. Called on
    /// disconnect so no group keeps a dangling delivery target.
    pub async fn leave_all(&self, conn_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        rooms.retain(|_, room| {
            room.retain(|c| c.conn_id != conn_id);
            !room.is_empty()
        });
    }

    /// Send a message to every connection subscribed to a chat, including
    /// the sender's own sessions. Delivery per subscriber follows the order
    /// broadcasts are issued in.
    pub async fn broadcast(&self, chat_id: Uuid, message: ServerMessage) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&chat_id) {
            for client in room {
                // A failed send means the receiver hung up; leave_all will
                // clean the handle out when its session task exits.
                let _ = client.sender.send(message.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(user_id: Uuid) -> (ClientHandle, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            ClientHandle {
                conn_id: Uuid::new_v4(),
                user_id,
                sender: tx,
            },
            rx,
        )
    }

    fn text_of(msg: ServerMessage) -> String {
        match msg {
            ServerMessage::Error { message } => message,
            ServerMessage::NewMessage { content, .. } => content,
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let server = ChatServer::new();
        let chat_id = Uuid::new_v4();

        let (a, mut rx_a) = handle(Uuid::new_v4());
        let (b, mut rx_b) = handle(Uuid::new_v4());
        server.join(chat_id, a).await;
        server.join(chat_id, b).await;

        server.broadcast(chat_id, ServerMessage::error("hi")).await;

        assert_eq!(text_of(rx_a.try_recv().unwrap()), "hi");
        assert_eq!(text_of(rx_b.try_recv().unwrap()), "hi");
    }

    #[tokio::test]
    async fn broadcast_preserves_issue_order() {
        let server = ChatServer::new();
        let chat_id = Uuid::new_v4();

        let (a, mut rx) = handle(Uuid::new_v4());
        server.join(chat_id, a).await;

        for i in 0..3 {
            server
                .broadcast(chat_id, ServerMessage::error(format!("m{i}")))
                .await;
        }

        for i in 0..3 {
            assert_eq!(text_of(rx.try_recv().unwrap()), format!("m{i}"));
        }
    }

    #[tokio::test]
    async fn duplicate_join_delivers_once() {
        let server = ChatServer::new();
        let chat_id = Uuid::new_v4();

        let (a, mut rx) = handle(Uuid::new_v4());
        server.join(chat_id, a.clone()).await;
        server.join(chat_id, a).await;

        server.broadcast(chat_id, ServerMessage::error("once")).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_is_scoped_to_the_chat() {
        let server = ChatServer::new();

        let (a, mut rx_a) = handle(Uuid::new_v4());
        let (b, mut rx_b) = handle(Uuid::new_v4());
        server.join(Uuid::new_v4(), a).await;
        let other_chat = Uuid::new_v4();
        server.join(other_chat, b).await;

        server
            .broadcast(other_chat, ServerMessage::error("for b"))
            .await;

        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn leave_all_unsubscribes_from_every_room() {
        let server = ChatServer::new();
        let chat_x = Uuid::new_v4();
        let chat_y = Uuid::new_v4();

        let (a, mut rx) = handle(Uuid::new_v4());
        let conn_id = a.conn_id;
        server.join(chat_x, a.clone()).await;
        server.join(chat_y, a).await;

        server.leave_all(conn_id).await;

        server.broadcast(chat_x, ServerMessage::error("x")).await;
        server.broadcast(chat_y, ServerMessage::error("y")).await;

        assert!(rx.try_recv().is_err());
    }
}
