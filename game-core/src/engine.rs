use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::WordBank;
use game_types::{GameError, MAX_MISTAKES, Round, RoundAction, RoundStatus};

/// Begin a fresh round with a word drawn uniformly from `word_bank`.
pub fn start_round<R: Rng + ?Sized>(word_bank: &WordBank, rng: &mut R) -> Result<Round, GameError> {
    let word = word_bank.choose(rng)?;
    Ok(round_with_word(word))
}

/// Begin a fresh round with a known word.
pub fn round_with_word(word: &str) -> Round {
    Round {
        word: word.to_string(),
        revealed: vec![false; word.chars().count()],
        used_letters: BTreeSet::new(),
        mistake_count: 0,
        status: RoundStatus::InProgress,
    }
}

/// Lowercase form of a single alphabetic character, or `None` for anything
/// that is not exactly one letter.
fn normalize_letter(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_alphabetic() {
        return None;
    }
    letter.to_lowercase().next()
}

fn lowercase_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Apply one guess. Finished rounds, empty or multi-character input,
/// non-letters and repeated letters leave the round untouched.
pub fn guess(round: Round, letter: &str) -> Round {
    if round.status != RoundStatus::InProgress {
        return round;
    }

    let Some(letter) = normalize_letter(letter) else {
        return round;
    };

    if round.used_letters.contains(&letter) {
        return round;
    }

    let mut next = round;
    next.used_letters.insert(letter);

    let mut hit = false;
    for (position, c) in next.word.chars().enumerate() {
        if lowercase_char(c) == letter {
            if let Some(shown) = next.revealed.get_mut(position) {
                *shown = true;
            }
            hit = true;
        }
    }

    if !hit {
        next.mistake_count = (next.mistake_count + 1).min(MAX_MISTAKES);
    }

    // Win is checked first: a correct guess never moves mistake_count.
    next.status = if next.revealed.iter().all(|shown| *shown) {
        RoundStatus::Won
    } else if next.mistake_count == MAX_MISTAKES {
        RoundStatus::Lost
    } else {
        RoundStatus::InProgress
    };

    debug!(
        letter = %letter,
        hit,
        mistakes = next.mistake_count,
        status = ?next.status,
        "guess applied"
    );

    next
}

/// Round reducer: `(Round, RoundAction) -> Round`.
pub fn reduce(round: Round, action: RoundAction) -> Round {
    match action {
        RoundAction::Guess(letter) => guess(round, &letter),
    }
}
