use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{PlayerId, RoomId};

/// Per-letter classification of a guess against a target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterFeedback {
    Hit,     // correct letter in correct position
    Present, // letter occurs somewhere else in the target
    Miss,    // letter not in the target
}

/// Relative outcome for a room member once every member has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomOutcome {
    Win,
    Tie,
    Lose,
}

/// Tagged per-session state. Handlers consult the transition table below
/// instead of inferring where a session is from which optional fields
/// happen to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Connected,
    SoloStarted,
    RoomPending,
    RoomReady,
    Guessing,
    Finished,
}

impl SessionPhase {
    /// Legal transitions of the session state machine. `Finished` is
    /// terminal.
    pub fn can_advance(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Connected, SoloStarted)
                | (Connected, RoomPending)
                | (RoomPending, RoomReady)
                | (SoloStarted, Guessing)
                | (RoomReady, Guessing)
                | (Guessing, Finished)
        )
    }

    /// Phases in which a guess may be accepted. A guess in any other phase
    /// is a stale event and is dropped without a reply.
    pub fn accepts_guesses(self) -> bool {
        matches!(
            self,
            SessionPhase::SoloStarted | SessionPhase::RoomReady | SessionPhase::Guessing
        )
    }
}

/// A connected player's stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub current_round: u32,
    pub hit_target_word: bool,
    pub phase: SessionPhase,
    /// Set once (solo answer or rotated room word), immutable thereafter.
    pub target_word: Option<String>,
    /// The word contributed when creating/joining a room.
    pub provided_word: Option<String>,
    pub room_id: Option<RoomId>,
    pub room_result: Option<RoomOutcome>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            current_round: 0,
            hit_target_word: false,
            phase: SessionPhase::Connected,
            target_word: None,
            provided_word: None,
            room_id: None,
            room_result: None,
        }
    }
}

/// A member's contribution to a room. Kept in a Vec because the insertion
/// order is the join order, and the join order drives target rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributedWord {
    pub player_id: PlayerId,
    pub word: String,
}

/// How a member's game ended, recorded as each member finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoomResult {
    pub hit_target_word: bool,
    pub rounds_used: u32,
}

/// A room's stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub ready: bool,
    pub num_of_players: u32,
    pub words: Vec<ContributedWord>,
    pub results: HashMap<PlayerId, PlayerRoomResult>,
}

impl Room {
    pub fn new(id: RoomId, num_of_players: u32) -> Self {
        Self {
            id,
            ready: false,
            num_of_players,
            words: Vec::new(),
            results: HashMap::new(),
        }
    }

    /// Member ids in join order.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.words.iter().map(|c| c.player_id).collect()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.words.iter().any(|c| c.player_id == player_id)
    }

    pub fn is_full(&self) -> bool {
        self.words.len() as u32 >= self.num_of_players
    }

    /// All members have a recorded result.
    pub fn is_resolved(&self) -> bool {
        self.results.len() as u32 == self.num_of_players
    }

    /// Record a contribution, overwriting the word if the member already
    /// contributed (the join position is kept).
    pub fn insert_word(&mut self, player_id: PlayerId, word: &str) {
        if let Some(entry) = self.words.iter_mut().find(|c| c.player_id == player_id) {
            entry.word = word.to_string();
        } else {
            self.words.push(ContributedWord {
                player_id,
                word: word.to_string(),
            });
        }
    }

    /// Target assignment by circular rotation: the member at join position
    /// i must guess the word contributed by the member at position
    /// (i + 1) mod n. Nobody guesses their own word and every word is
    /// guessed exactly once.
    pub fn rotated_targets(&self) -> Vec<(PlayerId, String)> {
        let n = self.words.len();
        self.words
            .iter()
            .enumerate()
            .map(|(i, c)| (c.player_id, self.words[(i + 1) % n].word.clone()))
            .collect()
    }
}
