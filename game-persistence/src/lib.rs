pub mod repositories;
pub mod store;

pub use repositories::{AddPlayer, PlayerRepository, RoomRepository};
pub use store::{EntityLocks, KeyValueStore, MemoryStore, StoreError};
