use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use game_types::{ClientMessage, LetterFeedback, ServerMessage};

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://127.0.0.1:3000/ws".to_string());

    let (websocket, _) = connect_async(url.as_str())
        .await
        .with_context(|| format!("connecting to {url}"))?;
    let (mut sender, mut receiver) = websocket.split();

    println!("Connected to {url}.");
    println!("Commands: /room <word> <players>, /join <roomId> <word>, /solo, or type a guess.");

    let stdin_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let Some(message) = parse_command(line.trim()) else {
                eprintln!("Could not parse that command.");
                continue;
            };
            let frame = match serde_json::to_string(&message) {
                Ok(frame) => frame,
                Err(e) => {
                    eprintln!("Failed to encode message: {e}");
                    continue;
                }
            };
            if sender.send(Message::text(frame)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => break,
        };
        let Message::Text(text) = frame else {
            continue;
        };
        match serde_json::from_str::<ServerMessage>(text.as_str()) {
            Ok(message) => print_message(&message),
            Err(_) => println!("{text}"),
        }
    }

    stdin_task.abort();
    println!("Disconnected.");
    Ok(())
}

fn parse_command(line: &str) -> Option<ClientMessage> {
    if line.is_empty() {
        return None;
    }
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "/room" => {
            let word = parts.next()?.to_string();
            let num_of_players = parts.next()?.parse().ok()?;
            Some(ClientMessage::CreateRoom {
                word,
                num_of_players,
            })
        }
        "/join" => {
            let room_id = parts.next()?.parse().ok()?;
            let word = parts.next()?.to_string();
            Some(ClientMessage::JoinRoom { room_id, word })
        }
        "/solo" => Some(ClientMessage::PlaySingle),
        guess if !guess.starts_with('/') => Some(ClientMessage::Guess {
            guess: guess.to_string(),
        }),
        _ => None,
    }
}

fn print_message(message: &ServerMessage) {
    match message {
        ServerMessage::Welcome { player_id } => {
            println!("Welcome, your player ID is {player_id}");
        }
        ServerMessage::RoomCreated { message, .. } => println!("{message}"),
        ServerMessage::PlayerJoinedRoom { message, .. } => println!("{message}"),
        ServerMessage::Start { message } => println!("{message}"),
        ServerMessage::Feedback { feedback } => {
            println!("Feedback: {}", render_feedback(feedback));
        }
        ServerMessage::ReportProgress {
            player_id,
            current_round,
        } => println!("Player {player_id} is on round {current_round}"),
        ServerMessage::Result { message } => println!("{message}"),
        ServerMessage::RoomResult { message } => println!("{message}"),
        ServerMessage::Error { message } => println!("Error: {message}"),
    }
}

fn render_feedback(feedback: &[LetterFeedback]) -> String {
    feedback
        .iter()
        .map(|code| match code {
            LetterFeedback::Hit => "O",
            LetterFeedback::Present => "?",
            LetterFeedback::Miss => "_",
        })
        .collect::<Vec<_>>()
        .join(" ")
}
