use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_client::config::ClientConfig;
use game_client::render::{render_player, render_round};
use game_client::{FileSessionCache, HttpPlayerApi, SessionController};
use game_core::{WordBank, start_round};
use game_types::Round;

type Session = SessionController<HttpPlayerApi, FileSessionCache>;
type Input = Lines<BufReader<Stdin>>;

const HELP: &str = "Type a letter to guess. Commands: :new  :login  :logout  :quit";

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{}> ", label);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

/// Ask for a name until login succeeds. A blank line plays without a
/// player, so outcomes are not recorded.
async fn login_prompt(session: &mut Session, input: &mut Input) -> Result<()> {
    loop {
        let Some(line) = prompt(input, "Player name (blank to play as guest)").await? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            return Ok(());
        }

        match session.login(&line).await {
            Ok(player) => {
                info!("Logged in as {}", player.player_name);
                return Ok(());
            }
            Err(err) => {
                tracing::error!("Login/create error: {}", err);
                println!("Login failed");
            }
        }
    }
}

fn print_screen(session: &Session, round: &Round) {
    println!("\n{}", render_player(session.current()));
    if !session.is_synced() {
        println!("(stats not yet saved to the server)");
    }
    println!("\n{}\n", render_round(round));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new();
    info!("Using API at {}", config.api_url);

    let mut session = SessionController::new(
        HttpPlayerApi::new(&config.api_url),
        FileSessionCache::new(&config.session_dir),
    );
    session.restore();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    if !session.is_logged_in() {
        login_prompt(&mut session, &mut input).await?;
    }

    let word_bank = WordBank::default();
    let mut rng = rand::rng();
    let mut round = start_round(&word_bank, &mut rng)?;

    println!("{}", HELP);
    print_screen(&session, &round);

    while let Some(line) = prompt(&mut input, "Guess").await? {
        match line.trim() {
            ":quit" => break,
            ":new" => round = start_round(&word_bank, &mut rng)?,
            ":logout" => session.logout().await,
            ":login" => login_prompt(&mut session, &mut input).await?,
            guess => round = session.apply_guess(round, guess).await,
        }
        print_screen(&session, &round);
    }

    if !session.is_synced() {
        if let Err(err) = session.sync().await {
            tracing::warn!("Exiting with unsaved stats: {}", err);
        }
    }
    Ok(())
}
