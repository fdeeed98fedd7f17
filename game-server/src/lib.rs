use std::sync::Arc;
use warp::Filter;

use crate::engine::GameEngine;

pub mod config;
pub mod engine;
pub mod websocket;

pub fn create_routes(
    engine: Arc<GameEngine>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let engine_filter = warp::any().map({
        let engine = engine.clone();
        move || engine.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(engine_filter)
        .map(|ws: warp::ws::Ws, engine| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, engine))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    websocket.or(health).with(warp::log("game_server"))
}
