use std::sync::Arc;

use tracing::info;

use crate::store::{EntityLocks, KeyValueStore, StoreError};
use game_types::{Player, PlayerId, RoomId, RoomOutcome, SessionPhase};

const PLAYER_ID_SEQ: &str = "player:last-id";

fn player_key(id: PlayerId) -> String {
    format!("player:{id}")
}

/// CRUD over player records; owns the player ID sequence. Records are
/// stored as JSON under `player:{id}`. Every single-field update is a full
/// read then a full write of the record, held under the player's entity
/// lock; a missing player (already disconnected) makes the update a silent
/// no-op.
pub struct PlayerRepository {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<EntityLocks>,
}

impl PlayerRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, locks: Arc<EntityLocks>) -> Self {
        Self { store, locks }
    }

    pub async fn create(&self) -> Result<Player, StoreError> {
        let id = self.store.increment(PLAYER_ID_SEQ).await?;
        let player = Player::new(id);
        self.write(&player).await?;
        info!(player_id = id, "created player");
        Ok(player)
    }

    pub async fn read(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        let key = player_key(id);
        match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed { key, source }),
            None => Ok(None),
        }
    }

    /// Idempotent; deleting an unknown player is fine.
    pub async fn delete(&self, id: PlayerId) -> Result<(), StoreError> {
        self.store.delete(&player_key(id)).await?;
        info!(player_id = id, "deleted player");
        Ok(())
    }

    pub async fn set_target_word(&self, id: PlayerId, word: &str) -> Result<(), StoreError> {
        let word = word.to_string();
        self.update(id, move |p| p.target_word = Some(word)).await
    }

    pub async fn set_provided_word(&self, id: PlayerId, word: &str) -> Result<(), StoreError> {
        let word = word.to_string();
        self.update(id, move |p| p.provided_word = Some(word)).await
    }

    pub async fn set_room_id(&self, id: PlayerId, room_id: RoomId) -> Result<(), StoreError> {
        self.update(id, move |p| p.room_id = Some(room_id)).await
    }

    pub async fn set_hit_target_word(&self, id: PlayerId, hit: bool) -> Result<(), StoreError> {
        self.update(id, move |p| p.hit_target_word = hit).await
    }

    pub async fn set_room_result(
        &self,
        id: PlayerId,
        outcome: RoomOutcome,
    ) -> Result<(), StoreError> {
        self.update(id, move |p| p.room_result = Some(outcome)).await
    }

    pub async fn set_phase(&self, id: PlayerId, phase: SessionPhase) -> Result<(), StoreError> {
        self.update(id, move |p| p.phase = phase).await
    }

    /// Bump the round counter and return the new value, or None when the
    /// player no longer exists. The add happens under the lock so two
    /// accepted guesses can never observe the same round.
    pub async fn increment_round(&self, id: PlayerId) -> Result<Option<u32>, StoreError> {
        let lock = self.locks.for_key(&player_key(id));
        let _guard = lock.lock().await;

        match self.read(id).await? {
            Some(mut player) => {
                player.current_round += 1;
                let round = player.current_round;
                self.write(&player).await?;
                Ok(Some(round))
            }
            None => Ok(None),
        }
    }

    async fn update<F>(&self, id: PlayerId, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Player),
    {
        let lock = self.locks.for_key(&player_key(id));
        let _guard = lock.lock().await;

        if let Some(mut player) = self.read(id).await? {
            apply(&mut player);
            self.write(&player).await?;
        }
        Ok(())
    }

    async fn write(&self, player: &Player) -> Result<(), StoreError> {
        let key = player_key(player.id);
        let raw = serde_json::to_string(player)
            .map_err(|source| StoreError::Malformed { key: key.clone(), source })?;
        self.store.set(&key, raw).await
    }
}
