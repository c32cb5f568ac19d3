use game_core::{WordBank, guess, round_with_word};
use game_types::{Round, RoundStatus};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Creates a word bank with a known set of words
pub fn create_test_bank() -> WordBank {
    WordBank::from_word_list("apple\nbanana\ncherry\nletter\nmississippi")
}

/// Deterministic RNG so round selection is reproducible
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Applies each character of `letters` as a separate guess
pub fn guess_all(round: Round, letters: &str) -> Round {
    letters
        .chars()
        .fold(round, |r, c| guess(r, &c.to_string()))
}

/// Letters from a-z that do not appear in `word`
pub fn missing_letters(word: &str) -> Vec<char> {
    let lower = word.to_lowercase();
    ('a'..='z').filter(|c| !lower.contains(*c)).collect()
}

/// Creates a round that is one wrong guess away from being lost
pub fn create_near_loss_round(word: &str) -> Round {
    let wrong: String = missing_letters(word).into_iter().take(5).collect();
    let round = guess_all(round_with_word(word), &wrong);
    assert_eq!(round.mistake_count, 5);
    round
}

/// Asserts that a round is in a specific state
pub fn assert_round_state(round: &Round, expected_status: RoundStatus, expected_mistakes: u32) {
    assert_eq!(
        round.status, expected_status,
        "Expected status {:?}, got {:?}",
        expected_status, round.status
    );
    assert_eq!(
        round.mistake_count, expected_mistakes,
        "Expected {} mistakes, got {}",
        expected_mistakes, round.mistake_count
    );
}
