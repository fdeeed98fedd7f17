use serde::{Deserialize, Serialize};

use crate::{LetterFeedback, PlayerId, RoomId};

/// Messages received from clients: one JSON object per text frame, tagged
/// by `type` with camelCase names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    CreateRoom { word: String, num_of_players: u32 },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, word: String },
    PlaySingle,
    Guess { guess: String },
}

/// Messages sent to clients, same framing as [`ClientMessage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Welcome { player_id: PlayerId },
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: RoomId, message: String },
    #[serde(rename_all = "camelCase")]
    PlayerJoinedRoom {
        player_id: PlayerId,
        room_id: RoomId,
        message: String,
    },
    Start { message: String },
    Feedback { feedback: Vec<LetterFeedback> },
    #[serde(rename_all = "camelCase")]
    ReportProgress {
        player_id: PlayerId,
        current_round: u32,
    },
    Result { message: String },
    RoomResult { message: String },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_messages_use_wire_names() {
        let welcome = serde_json::to_value(ServerMessage::Welcome { player_id: 7 }).unwrap();
        assert_eq!(welcome, json!({"type": "welcome", "playerId": 7}));

        let progress = serde_json::to_value(ServerMessage::ReportProgress {
            player_id: 3,
            current_round: 2,
        })
        .unwrap();
        assert_eq!(
            progress,
            json!({"type": "reportProgress", "playerId": 3, "currentRound": 2})
        );

        let feedback = serde_json::to_value(ServerMessage::Feedback {
            feedback: vec![
                LetterFeedback::Hit,
                LetterFeedback::Present,
                LetterFeedback::Miss,
            ],
        })
        .unwrap();
        assert_eq!(
            feedback,
            json!({"type": "feedback", "feedback": ["hit", "present", "miss"]})
        );
    }

    #[test]
    fn test_client_messages_parse_from_wire() {
        let create: ClientMessage = serde_json::from_str(
            r#"{"type": "createRoom", "word": "apple", "numOfPlayers": 2}"#,
        )
        .unwrap();
        assert!(matches!(
            create,
            ClientMessage::CreateRoom { ref word, num_of_players: 2 } if word == "apple"
        ));

        let join: ClientMessage =
            serde_json::from_str(r#"{"type": "joinRoom", "roomId": 1, "word": "mango"}"#).unwrap();
        assert!(matches!(
            join,
            ClientMessage::JoinRoom { room_id: 1, ref word } if word == "mango"
        ));

        let solo: ClientMessage = serde_json::from_str(r#"{"type": "playSingle"}"#).unwrap();
        assert!(matches!(solo, ClientMessage::PlaySingle));

        let guess: ClientMessage =
            serde_json::from_str(r#"{"type": "guess", "guess": "crane"}"#).unwrap();
        assert!(matches!(guess, ClientMessage::Guess { ref guess } if guess == "crane"));
    }
}
