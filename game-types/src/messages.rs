use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerError;

/// Query string of `GET /player`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerQuery {
    pub player_name: Option<String>,
}

/// Body of `POST /player`. Tallies default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePlayerRequest {
    pub player_name: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

/// Body of `PUT /player`. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePlayerRequest {
    pub player_name: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub ok: bool,
}

fn required_name(player_name: Option<&str>) -> Result<&str, PlayerError> {
    match player_name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(PlayerError::validation("playerName required")),
    }
}

impl PlayerQuery {
    pub fn validate(&self) -> Result<&str, PlayerError> {
        required_name(self.player_name.as_deref())
            .map_err(|_| PlayerError::validation("missing playerName"))
    }
}

impl CreatePlayerRequest {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: Some(player_name.into()),
            wins: Some(0),
            losses: Some(0),
        }
    }

    pub fn validate(&self) -> Result<(&str, u32, u32), PlayerError> {
        let name = required_name(self.player_name.as_deref())?;
        Ok((name, self.wins.unwrap_or(0), self.losses.unwrap_or(0)))
    }
}

impl UpdatePlayerRequest {
    pub fn new(player_name: impl Into<String>, wins: u32, losses: u32) -> Self {
        Self {
            player_name: Some(player_name.into()),
            wins: Some(wins),
            losses: Some(losses),
        }
    }

    pub fn validate(&self) -> Result<(&str, u32, u32), PlayerError> {
        match (self.player_name.as_deref(), self.wins, self.losses) {
            (Some(name), Some(wins), Some(losses)) if !name.is_empty() => Ok((name, wins, losses)),
            _ => Err(PlayerError::validation(
                "playerName, wins, losses required (numbers)",
            )),
        }
    }
}
