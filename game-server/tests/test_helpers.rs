use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use game_core::WordList;
use game_persistence::{
    EntityLocks, KeyValueStore, MemoryStore, PlayerRepository, RoomRepository,
};
use game_server::config::Config;
use game_server::engine::GameEngine;
use game_server::websocket::ConnectionManager;
use game_types::{LetterFeedback, PlayerId, ServerMessage};

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        word_length: 5,
        max_rounds: 5,
        max_players_in_room: 4,
        word_list_path: String::new(),
    }
}

/// All engine collaborators wired against an in-memory store. Tests drive
/// the engine directly and observe outbound traffic through the captured
/// per-player receivers.
pub struct TestSetup {
    pub engine: Arc<GameEngine>,
    pub players: Arc<PlayerRepository>,
    pub rooms: Arc<RoomRepository>,
    pub connections: Arc<ConnectionManager>,
}

impl TestSetup {
    /// The word list doubles as the solo answer pool, so tests that need a
    /// deterministic solo target pass a single word.
    pub fn with_words(words: &str) -> Self {
        let config = test_config();
        let word_list = WordList::parse(words, config.word_length);

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let locks = Arc::new(EntityLocks::new());
        let players = Arc::new(PlayerRepository::new(store.clone(), locks.clone()));
        let rooms = Arc::new(RoomRepository::new(store, locks, players.clone()));
        let connections = Arc::new(ConnectionManager::new());

        let engine = GameEngine::new(
            players.clone(),
            rooms.clone(),
            connections.clone(),
            &config,
            &word_list,
        )
        .expect("engine should start with a non-empty word list");

        Self {
            engine: Arc::new(engine),
            players,
            rooms,
            connections,
        }
    }

    pub fn new() -> Self {
        Self::with_words("crane\napple\nmango\npeach\nhouse\nworld")
    }

    /// Open a session and consume the welcome message.
    pub async fn connect(&self) -> (PlayerId, UnboundedReceiver<ServerMessage>) {
        let (player_id, mut receiver) = self.engine.on_connect().await.expect("connect");
        let welcome = receiver.try_recv().expect("welcome should be queued");
        assert!(
            matches!(welcome, ServerMessage::Welcome { player_id: id } if id == player_id),
            "expected welcome for {player_id}, got {welcome:?}"
        );
        (player_id, receiver)
    }
}

/// Everything the engine has sent to this session so far.
pub fn drain(receiver: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

pub fn expect_error(message: &ServerMessage) -> &str {
    match message {
        ServerMessage::Error { message } => message,
        _ => panic!("Expected error message, got {message:?}"),
    }
}

pub fn expect_feedback(message: &ServerMessage) -> &[LetterFeedback] {
    match message {
        ServerMessage::Feedback { feedback } => feedback,
        _ => panic!("Expected feedback message, got {message:?}"),
    }
}

pub fn expect_result(message: &ServerMessage) -> &str {
    match message {
        ServerMessage::Result { message } => message,
        _ => panic!("Expected result message, got {message:?}"),
    }
}

pub fn expect_room_result(message: &ServerMessage) -> &str {
    match message {
        ServerMessage::RoomResult { message } => message,
        _ => panic!("Expected roomResult message, got {message:?}"),
    }
}
