use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Wrong guesses allowed before the round is lost.
pub const MAX_MISTAKES: u32 = 6;

/// One playthrough from word selection to win or loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Round {
    pub word: String,
    pub revealed: Vec<bool>,
    pub used_letters: BTreeSet<char>,
    pub mistake_count: u32,
    pub status: RoundStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    Win,
    Loss,
}

/// Inputs accepted by the round reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundAction {
    Guess(String),
}

impl Round {
    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status {
            RoundStatus::InProgress => None,
            RoundStatus::Won => Some(RoundOutcome::Win),
            RoundStatus::Lost => Some(RoundOutcome::Loss),
        }
    }

    /// Gallows stage to draw, 0 (empty) through `MAX_MISTAKES` (complete).
    pub fn stage(&self) -> usize {
        self.mistake_count.min(MAX_MISTAKES) as usize
    }

    pub fn remaining_lives(&self) -> u32 {
        MAX_MISTAKES.saturating_sub(self.mistake_count)
    }

    /// The word as a player sees it: revealed letters in their original
    /// casing, `_` for everything else.
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .zip(self.revealed.iter())
            .map(|(c, shown)| if *shown { c } else { '_' })
            .collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|shown| **shown).count()
    }
}
