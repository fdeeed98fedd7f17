pub mod player_repository;
pub mod room_repository;

pub use player_repository::PlayerRepository;
pub use room_repository::{AddPlayer, RoomRepository};
