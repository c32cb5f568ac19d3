use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::warn;

use game_types::GameError;

/// Words used when no other list is configured.
pub const DEFAULT_WORDS: [&str; 8] = [
    "Morehouse",
    "Spelman",
    "Basketball",
    "Table",
    "Museum",
    "Excellent",
    "Fun",
    "React",
];

/// Static, ordered list of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Blank entries are dropped. Entries with anything other than letters
    /// are dropped with a warning, since only letters can be guessed.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .map(|word: String| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .filter(|word| {
                let guessable = word.chars().all(char::is_alphabetic);
                if !guessable {
                    warn!("Skipping unguessable word {:?}", word);
                }
                guessable
            })
            .collect();

        Self { words }
    }

    /// Build a bank from a word list, one word per line. Blank lines and
    /// `#` comments are skipped.
    pub fn from_word_list(word_list: &str) -> Self {
        Self::new(
            word_list
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word.trim()))
    }

    /// Pick a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, GameError> {
        self.words
            .choose(rng)
            .map(String::as_str)
            .ok_or(GameError::EmptyWordBank)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}
