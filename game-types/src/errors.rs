use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("word bank is empty")]
    EmptyWordBank,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlayerError {
    /// Missing or malformed input. Caller fault, never retried.
    #[error("{message}")]
    Validation { message: String },
    #[error("player already exists: {player_name}")]
    Conflict { player_name: String },
    #[error("player not found: {player_name}")]
    NotFound { player_name: String },
    /// Store or network failure.
    #[error("backend error: {message}")]
    Backend { message: String },
}

impl PlayerError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlayerError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(player_name: impl Into<String>) -> Self {
        PlayerError::Conflict {
            player_name: player_name.into(),
        }
    }

    pub fn not_found(player_name: impl Into<String>) -> Self {
        PlayerError::NotFound {
            player_name: player_name.into(),
        }
    }

    pub fn backend(message: impl ToString) -> Self {
        PlayerError::Backend {
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlayerError::NotFound { .. })
    }
}
