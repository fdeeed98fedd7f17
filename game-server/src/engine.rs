use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::websocket::ConnectionManager;
use game_core::{FeedbackEngine, ResultResolver, WordList};
use game_persistence::{AddPlayer, PlayerRepository, RoomRepository, StoreError};
use game_types::{
    ClientMessage, GameError, PlayerId, Room, RoomId, RoomOutcome, ServerMessage, SessionPhase,
};

/// Root orchestrator. Every inbound protocol event lands here; the engine
/// is the only caller of the repositories and the only producer of outbound
/// messages. A returned `StoreError` means the event could not be handled
/// and the transport should drop the session.
pub struct GameEngine {
    players: Arc<PlayerRepository>,
    rooms: Arc<RoomRepository>,
    connections: Arc<ConnectionManager>,
    word_length: usize,
    max_rounds: u32,
    max_players_in_room: u32,
    /// One random answer picked at startup and shared by every solo game.
    solo_answer: String,
}

impl GameEngine {
    pub fn new(
        players: Arc<PlayerRepository>,
        rooms: Arc<RoomRepository>,
        connections: Arc<ConnectionManager>,
        config: &Config,
        word_list: &WordList,
    ) -> anyhow::Result<Self> {
        let solo_answer = word_list.random_word()?;
        info!("solo answer is {solo_answer}");

        Ok(Self {
            players,
            rooms,
            connections,
            word_length: config.word_length,
            max_rounds: config.max_rounds,
            max_players_in_room: config.max_players_in_room,
            solo_answer,
        })
    }

    /// A session opened: create the player record, register the session
    /// under the new id and greet it. Returns the receiver the transport
    /// pumps to the socket.
    pub async fn on_connect(
        &self,
    ) -> Result<(PlayerId, mpsc::UnboundedReceiver<ServerMessage>), StoreError> {
        let player = self.players.create().await?;
        let receiver = self.connections.register(player.id).await;
        self.send(player.id, ServerMessage::Welcome { player_id: player.id })
            .await;
        Ok((player.id, receiver))
    }

    /// A session closed: drop the record. Room members waiting on this
    /// player are not notified and the room is not rebalanced.
    pub async fn on_disconnect(&self, player_id: PlayerId) -> Result<(), StoreError> {
        self.connections.deregister(player_id).await;
        self.players.delete(player_id).await
    }

    pub async fn handle_message(
        &self,
        player_id: PlayerId,
        message: ClientMessage,
    ) -> Result<(), StoreError> {
        match message {
            ClientMessage::CreateRoom {
                word,
                num_of_players,
            } => {
                self.handle_create_room(player_id, &word, num_of_players)
                    .await
            }
            ClientMessage::JoinRoom { room_id, word } => {
                self.handle_join_room(player_id, room_id, &word).await
            }
            ClientMessage::PlaySingle => self.handle_play_single(player_id).await,
            ClientMessage::Guess { guess } => self.handle_guess(player_id, &guess).await,
        }
    }

    async fn handle_create_room(
        &self,
        player_id: PlayerId,
        word: &str,
        num_of_players: u32,
    ) -> Result<(), StoreError> {
        info!(player_id, "create room request");

        let Some(player) = self.players.read(player_id).await? else {
            return Ok(());
        };
        if !player.phase.can_advance(SessionPhase::RoomPending) {
            return self.send_error(player_id, GameError::AlreadyPlaying).await;
        }
        if num_of_players < 2 || num_of_players > self.max_players_in_room {
            return self
                .send_error(
                    player_id,
                    GameError::InvalidRoomSize {
                        max: self.max_players_in_room,
                    },
                )
                .await;
        }
        let word = word.trim().to_lowercase();
        if word.chars().count() != self.word_length {
            return self
                .send_error(
                    player_id,
                    GameError::WrongWordLength {
                        expected: self.word_length,
                    },
                )
                .await;
        }

        let room = self.rooms.create(num_of_players).await?;
        if self.add_to_room(player_id, room.id, &word).await?.is_none() {
            return Ok(());
        }
        self.send(
            player_id,
            ServerMessage::RoomCreated {
                room_id: room.id,
                message: format!("Room {} is created.", room.id),
            },
        )
        .await;
        Ok(())
    }

    async fn handle_join_room(
        &self,
        player_id: PlayerId,
        room_id: RoomId,
        word: &str,
    ) -> Result<(), StoreError> {
        info!(player_id, room_id, "join room request");

        let Some(player) = self.players.read(player_id).await? else {
            return Ok(());
        };
        if !player.phase.can_advance(SessionPhase::RoomPending) {
            return self.send_error(player_id, GameError::AlreadyPlaying).await;
        }
        let word = word.trim().to_lowercase();
        if word.chars().count() != self.word_length {
            return self
                .send_error(
                    player_id,
                    GameError::WrongWordLength {
                        expected: self.word_length,
                    },
                )
                .await;
        }

        let Some(room) = self.add_to_room(player_id, room_id, &word).await? else {
            return Ok(());
        };

        for member_id in room.player_ids() {
            self.send(
                member_id,
                ServerMessage::PlayerJoinedRoom {
                    player_id,
                    room_id,
                    message: format!("Player {player_id} joined room {room_id}."),
                },
            )
            .await;
        }
        if room.ready {
            for member_id in room.player_ids() {
                self.send(
                    member_id,
                    ServerMessage::Start {
                        message: format!("Room {room_id} is ready, start playing..."),
                    },
                )
                .await;
            }
        }
        Ok(())
    }

    async fn handle_play_single(&self, player_id: PlayerId) -> Result<(), StoreError> {
        info!(player_id, "solo game request");

        let Some(player) = self.players.read(player_id).await? else {
            return Ok(());
        };
        if !player.phase.can_advance(SessionPhase::SoloStarted) {
            return self.send_error(player_id, GameError::AlreadyPlaying).await;
        }

        self.players
            .set_target_word(player_id, &self.solo_answer)
            .await?;
        self.players
            .set_phase(player_id, SessionPhase::SoloStarted)
            .await?;
        self.send(
            player_id,
            ServerMessage::Start {
                message: format!("Please enter a {}-letter word.", self.word_length),
            },
        )
        .await;
        Ok(())
    }

    async fn handle_guess(&self, player_id: PlayerId, guess: &str) -> Result<(), StoreError> {
        info!(player_id, guess, "received guess");

        // Unknown or already-finished players are stale events, not errors.
        let Some(player) = self.players.read(player_id).await? else {
            return Ok(());
        };
        if player.hit_target_word || player.phase == SessionPhase::Finished {
            return Ok(());
        }

        let guess = guess.trim().to_lowercase();
        if guess.chars().count() != self.word_length {
            return self
                .send_error(
                    player_id,
                    GameError::WrongWordLength {
                        expected: self.word_length,
                    },
                )
                .await;
        }

        // A guess before any game started (no target yet) is stale too.
        if !player.phase.accepts_guesses() {
            return Ok(());
        }
        let Some(target) = player.target_word.clone() else {
            return Ok(());
        };

        if player.phase != SessionPhase::Guessing {
            self.players
                .set_phase(player_id, SessionPhase::Guessing)
                .await?;
        }
        let Some(round) = self.players.increment_round(player_id).await? else {
            return Ok(());
        };

        let feedback = FeedbackEngine::compute(&guess, &target);
        info!(player_id, round, "sending feedback");
        self.send(player_id, ServerMessage::Feedback { feedback: feedback.clone() })
            .await;

        if let Some(room_id) = player.room_id {
            for member_id in self.rooms.player_ids_in_room(room_id).await? {
                if member_id == player_id {
                    continue;
                }
                self.send(
                    member_id,
                    ServerMessage::ReportProgress {
                        player_id,
                        current_round: round,
                    },
                )
                .await;
            }
        }

        let hit = FeedbackEngine::is_exact(&feedback);
        if hit {
            self.players.set_hit_target_word(player_id, true).await?;
            self.players
                .set_phase(player_id, SessionPhase::Finished)
                .await?;
            self.send(
                player_id,
                ServerMessage::Result {
                    message: "Congratulations! You've guessed the word!".to_string(),
                },
            )
            .await;
        } else if round >= self.max_rounds {
            self.players
                .set_phase(player_id, SessionPhase::Finished)
                .await?;
            self.send(
                player_id,
                ServerMessage::Result {
                    message: format!("Game over! The correct word was: {target}"),
                },
            )
            .await;
        } else {
            return Ok(());
        }

        if let Some(room_id) = player.room_id {
            self.settle_room_member(room_id, player_id, hit, round).await?;
        }
        Ok(())
    }

    /// Shared by create and join: contribute a word, move the player to
    /// RoomPending, and when the contribution fills the room advance every
    /// member to RoomReady. Failures are reported to the requester and
    /// yield None.
    async fn add_to_room(
        &self,
        player_id: PlayerId,
        room_id: RoomId,
        word: &str,
    ) -> Result<Option<Room>, StoreError> {
        match self.rooms.add_player(room_id, player_id, word).await? {
            AddPlayer::Added(room) => {
                self.players
                    .set_phase(player_id, SessionPhase::RoomPending)
                    .await?;
                if room.ready {
                    for member_id in room.player_ids() {
                        self.players
                            .set_phase(member_id, SessionPhase::RoomReady)
                            .await?;
                    }
                }
                Ok(Some(room))
            }
            AddPlayer::NotFound => {
                self.send_error(player_id, GameError::RoomNotFound(room_id))
                    .await?;
                Ok(None)
            }
            AddPlayer::Full => {
                self.send_error(player_id, GameError::RoomFull(room_id))
                    .await?;
                Ok(None)
            }
        }
    }

    /// Record a member's finish; when that completes the room, resolve the
    /// outcomes and deliver each member an individual verdict.
    async fn settle_room_member(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        hit_target_word: bool,
        rounds_used: u32,
    ) -> Result<(), StoreError> {
        let Some(room) = self
            .rooms
            .record_player_result(room_id, player_id, hit_target_word, rounds_used)
            .await?
        else {
            return Ok(());
        };
        if !room.is_resolved() {
            return Ok(());
        }

        info!(room_id, "all members finished, resolving outcomes");
        for (member_id, outcome) in ResultResolver::resolve(&room) {
            self.players.set_room_result(member_id, outcome).await?;
            let message = match outcome {
                RoomOutcome::Win => "You won the room! You guessed your word in the fewest rounds.",
                RoomOutcome::Tie => "It's a tie! You finished level with another player.",
                RoomOutcome::Lose => "You lost the room. Better luck next time!",
            };
            self.send(
                member_id,
                ServerMessage::RoomResult {
                    message: message.to_string(),
                },
            )
            .await;
        }
        Ok(())
    }

    async fn send(&self, player_id: PlayerId, message: ServerMessage) {
        if let Err(e) = self.connections.send_to_player(player_id, message).await {
            warn!(player_id, "failed to send message: {e}");
        }
    }

    async fn send_error(&self, player_id: PlayerId, error: GameError) -> Result<(), StoreError> {
        self.send(
            player_id,
            ServerMessage::Error {
                message: error.to_string(),
            },
        )
        .await;
        Ok(())
    }
}
