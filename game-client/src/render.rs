//! Plain-text views of a round and the logged-in player.

use game_types::{MAX_MISTAKES, PlayerStats, Round, RoundStatus};

/// One frame per mistake count: noose, head and body, lower body, one arm,
/// both arms, one leg, dead.
const GALLOWS: [&str; MAX_MISTAKES as usize + 1] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n=======",
    "  +---+\n  |   |\n  O   |\n  |   |\n  |   |\n=======",
    "  +---+\n  |   |\n  O   |\n /|   |\n  |   |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n  |   |\n=======",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n=======",
    "  +---+\n  |   |\n  X   |\n /|\\  |\n / \\  |\n=======",
];

pub fn gallows(round: &Round) -> &'static str {
    GALLOWS[round.stage()]
}

pub fn render_round(round: &Round) -> String {
    let spaced: Vec<String> = round.masked_word().chars().map(String::from).collect();
    let used: Vec<String> = round.used_letters.iter().map(char::to_string).collect();

    let mut out = format!(
        "{}\n\n{}\n\nUsed Letters: {}\nLives left: {}",
        gallows(round),
        spaced.join(" "),
        used.join(", "),
        round.remaining_lives()
    );

    match round.status {
        RoundStatus::Won => out.push_str("\n\nYou Won!"),
        RoundStatus::Lost => {
            out.push_str(&format!("\n\nYou Lose! The word was: {}", round.word));
        }
        RoundStatus::InProgress => {}
    }
    out
}

pub fn render_player(player: Option<&PlayerStats>) -> String {
    match player {
        Some(p) => format!(
            "{}\nWins: {} | Losses: {} | Win%: {}%",
            p.player_name, p.wins, p.losses, p.win_percentage
        ),
        None => "Not logged in".to_string(),
    }
}
