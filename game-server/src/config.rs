use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub word_length: usize,
    pub max_rounds: u32,
    pub max_players_in_room: u32,
    pub word_list_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("Invalid PORT"),
            word_length: env::var("WORD_LENGTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("Invalid WORD_LENGTH"),
            max_rounds: env::var("MAX_ROUNDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("Invalid MAX_ROUNDS"),
            max_players_in_room: env::var("MAX_PLAYERS_IN_ROOM")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .expect("Invalid MAX_PLAYERS_IN_ROOM"),
            word_list_path: env::var("WORD_LIST_PATH").unwrap_or_else(|_| "./words.txt".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
