use thiserror::Error;

use crate::RoomId;

/// Failures reported back to the offending session as an `error` message.
/// Stale events (unknown or already-finished players) are not errors; they
/// are dropped without a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Please enter a {expected}-letter word.")]
    WrongWordLength { expected: usize },
    #[error("A room must have between 2 and {max} players.")]
    InvalidRoomSize { max: u32 },
    #[error("Failed to find room {0}")]
    RoomNotFound(RoomId),
    #[error("Room {0} is already full.")]
    RoomFull(RoomId),
    #[error("You are already in a game.")]
    AlreadyPlaying,
}
