use std::sync::Arc;

use tracing::info;

use crate::repositories::PlayerRepository;
use crate::store::{EntityLocks, KeyValueStore, StoreError};
use game_types::{PlayerId, PlayerRoomResult, Room, RoomId};

const ROOM_ID_SEQ: &str = "room:last-id";

fn room_key(id: RoomId) -> String {
    format!("room:{id}")
}

/// Outcome of [`RoomRepository::add_player`].
#[derive(Debug)]
pub enum AddPlayer {
    Added(Room),
    /// The room or the player does not exist.
    NotFound,
    /// The room already holds `num_of_players` contributions.
    Full,
}

/// CRUD over room records plus the fill logic; owns the room ID sequence.
/// Records are stored as JSON under `room:{id}`. Room mutations run under
/// the room's entity lock and update member player records while holding it
/// (lock order: room, then player).
pub struct RoomRepository {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<EntityLocks>,
    players: Arc<PlayerRepository>,
}

impl RoomRepository {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        locks: Arc<EntityLocks>,
        players: Arc<PlayerRepository>,
    ) -> Self {
        Self {
            store,
            locks,
            players,
        }
    }

    /// Range validation of `num_of_players` is owned by the engine.
    pub async fn create(&self, num_of_players: u32) -> Result<Room, StoreError> {
        let id = self.store.increment(ROOM_ID_SEQ).await?;
        let room = Room::new(id, num_of_players);
        self.write(&room).await?;
        info!(room_id = id, num_of_players, "created room");
        Ok(room)
    }

    pub async fn read(&self, id: RoomId) -> Result<Option<Room>, StoreError> {
        let key = room_key(id);
        match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed { key, source }),
            None => Ok(None),
        }
    }

    /// Record a member's contribution and link the player to the room. When
    /// the contribution fills the room, the room turns ready and every
    /// member's target word is assigned by rotating the contributions one
    /// position in join order.
    pub async fn add_player(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        word: &str,
    ) -> Result<AddPlayer, StoreError> {
        let lock = self.locks.for_key(&room_key(room_id));
        let _guard = lock.lock().await;

        let Some(mut room) = self.read(room_id).await? else {
            return Ok(AddPlayer::NotFound);
        };
        if self.players.read(player_id).await?.is_none() {
            return Ok(AddPlayer::NotFound);
        }
        if room.is_full() && !room.contains(player_id) {
            return Ok(AddPlayer::Full);
        }

        self.players.set_room_id(player_id, room_id).await?;
        self.players.set_provided_word(player_id, word).await?;
        room.insert_word(player_id, word);

        if room.is_full() {
            room.ready = true;
            info!(room_id, "room is full, assigning target words");
            for (member_id, target) in room.rotated_targets() {
                self.players.set_target_word(member_id, &target).await?;
            }
        }

        self.write(&room).await?;
        Ok(AddPlayer::Added(room))
    }

    /// Member ids in join order; empty when the room does not exist.
    pub async fn player_ids_in_room(&self, room_id: RoomId) -> Result<Vec<PlayerId>, StoreError> {
        Ok(self
            .read(room_id)
            .await?
            .map(|room| room.player_ids())
            .unwrap_or_default())
    }

    /// Insert or overwrite a member's finish entry. The caller decides when
    /// the room is fully resolved (entry count == `num_of_players`).
    pub async fn record_player_result(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        hit_target_word: bool,
        rounds_used: u32,
    ) -> Result<Option<Room>, StoreError> {
        let lock = self.locks.for_key(&room_key(room_id));
        let _guard = lock.lock().await;

        let Some(mut room) = self.read(room_id).await? else {
            return Ok(None);
        };
        if self.players.read(player_id).await?.is_none() {
            return Ok(None);
        }

        room.results.insert(
            player_id,
            PlayerRoomResult {
                hit_target_word,
                rounds_used,
            },
        );
        self.write(&room).await?;
        Ok(Some(room))
    }

    async fn write(&self, room: &Room) -> Result<(), StoreError> {
        let key = room_key(room.id);
        let raw = serde_json::to_string(room)
            .map_err(|source| StoreError::Malformed { key: key.clone(), source })?;
        self.store.set(&key, raw).await
    }
}
