use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::engine::GameEngine;
use game_types::ClientMessage;

pub mod connection;

pub use connection::ConnectionManager;

pub async fn handle_connection(websocket: WebSocket, engine: Arc<GameEngine>) {
    let (mut ws_sender, mut ws_receiver) = websocket.split();

    // Create the player first: sessions are addressed by player id.
    let (player_id, message_receiver) = match engine.on_connect().await {
        Ok(session) => session,
        Err(e) => {
            error!("failed to open session: {e}");
            return;
        }
    };
    info!(player_id, "new WebSocket connection");

    // Incoming frames become engine events. A store failure is fatal to the
    // session, not retried.
    let incoming_handler = {
        let engine = engine.clone();
        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if msg.is_close() {
                            break;
                        }
                        let Ok(text) = msg.to_str() else {
                            continue;
                        };
                        let client_message: ClientMessage = match serde_json::from_str(text) {
                            Ok(message) => message,
                            Err(e) => {
                                warn!(player_id, "unknown message: {e}");
                                continue;
                            }
                        };
                        if let Err(e) = engine.handle_message(player_id, client_message).await {
                            error!(player_id, "failed to handle message: {e}");
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(player_id, "WebSocket error: {e}");
                        break;
                    }
                }
            }
        }
    };

    // Outgoing messages from the engine are pumped onto the socket.
    let outgoing_handler = {
        async move {
            let mut receiver = message_receiver;

            while let Some(message) = receiver.recv().await {
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("failed to serialize message: {e:?}");
                        continue;
                    }
                };

                if let Err(e) = ws_sender.send(Message::text(json)).await {
                    warn!(player_id, "failed to send message: {e:?}");
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!(player_id, "connection closed");
    if let Err(e) = engine.on_disconnect(player_id).await {
        error!(player_id, "failed to clean up session: {e}");
    }
}
