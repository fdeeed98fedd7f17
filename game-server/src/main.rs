use std::sync::Arc;
use tokio::signal;
use tracing::info;

use game_core::WordList;
use game_persistence::{
    EntityLocks, KeyValueStore, MemoryStore, PlayerRepository, RoomRepository,
};
use game_server::{config::Config, create_routes, engine::GameEngine, websocket::ConnectionManager};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting word game server...");

    let config = Config::from_env();

    let word_list = match WordList::load(&config.word_list_path, config.word_length) {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => {
            tracing::error!(
                "Word list '{}' contains no {}-letter words.",
                config.word_list_path,
                config.word_length
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to load word list '{}': {e}", config.word_list_path);
            tracing::error!("Set WORD_LIST_PATH to a newline-separated word file.");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let locks = Arc::new(EntityLocks::new());
    let players = Arc::new(PlayerRepository::new(store.clone(), locks.clone()));
    let rooms = Arc::new(RoomRepository::new(store, locks, players.clone()));
    let connections = Arc::new(ConnectionManager::new());

    let engine = match GameEngine::new(players, rooms, connections, &config, &word_list) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!("Failed to start the game engine: {e}");
            std::process::exit(1);
        }
    };

    let routes = create_routes(engine);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to listen for SIGINT");
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to listen for SIGTERM");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
