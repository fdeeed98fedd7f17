use std::collections::HashMap;

use tokio::sync::{RwLock, mpsc};

use game_types::{PlayerId, ServerMessage};

/// Registry of live sessions, addressed by player id. The engine sees the
/// transport only through this surface: send a message to a session, or
/// learn that a session is gone.
pub struct ConnectionManager {
    sessions: RwLock<HashMap<PlayerId, mpsc::UnboundedSender<ServerMessage>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session and hand back the receiver its writer task pumps
    /// to the socket.
    pub async fn register(&self, player_id: PlayerId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut sessions = self.sessions.write().await;
        sessions.insert(player_id, sender);
        receiver
    }

    pub async fn deregister(&self, player_id: PlayerId) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&player_id);
    }

    pub async fn send_to_player(
        &self,
        player_id: PlayerId,
        message: ServerMessage,
    ) -> Result<(), String> {
        let sessions = self.sessions.read().await;
        match sessions.get(&player_id) {
            Some(sender) => sender
                .send(message)
                .map_err(|_| "Session closed".to_string()),
            None => Err("Session not found".to_string()),
        }
    }

    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
