use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_dir: PathBuf,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_url: env::var("HANGMAN_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            session_dir: env::var("HANGMAN_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
