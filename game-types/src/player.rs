use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Persisted win/loss tally keyed by player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerRecord {
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    pub fn new(player_name: impl Into<String>, wins: u32, losses: u32) -> Self {
        Self {
            player_name: player_name.into(),
            wins,
            losses,
        }
    }

    pub fn win_percentage(&self) -> u32 {
        win_percentage(self.wins, self.losses)
    }

    pub fn to_stats(&self) -> PlayerStats {
        PlayerStats::from(self.clone())
    }
}

/// Wire and cache shape of a player: `{playerName, wins, losses, winPercentage}`.
///
/// `winPercentage` may be missing from older cache blobs, so it defaults to 0
/// on the way in; callers that load from a cache should go through
/// [`PlayerStats::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerStats {
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub win_percentage: u32,
}

impl PlayerStats {
    pub fn record(&self) -> PlayerRecord {
        PlayerRecord::new(self.player_name.clone(), self.wins, self.losses)
    }

    /// Recompute the derived percentage from the tallies.
    pub fn normalized(mut self) -> Self {
        self.win_percentage = win_percentage(self.wins, self.losses);
        self
    }
}

impl From<PlayerRecord> for PlayerStats {
    fn from(record: PlayerRecord) -> Self {
        let win_percentage = record.win_percentage();
        Self {
            player_name: record.player_name,
            wins: record.wins,
            losses: record.losses,
            win_percentage,
        }
    }
}

/// `round(wins / (wins + losses) * 100)`, halves rounded up; 0 when no games
/// have been played.
pub fn win_percentage(wins: u32, losses: u32) -> u32 {
    let total = wins as u64 + losses as u64;
    if total == 0 {
        return 0;
    }
    ((wins as u64 * 200 + total) / (total * 2)) as u32
}
