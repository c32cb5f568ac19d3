use std::sync::Arc;

use game_client::{HttpPlayerApi, MemorySessionCache, PlayerApi, SessionController};
use game_core::{guess, round_with_word};
use game_persistence::connection::{connect_and_migrate, memory_options};
use game_persistence::repositories::PlayerRepository;
use game_server::create_routes;
use game_types::{PlayerError, RoundOutcome, RoundStatus};

/// Serves the API on an ephemeral port over a fresh in-memory database.
/// Returns the base URL and the repository behind it.
async fn spawn_server() -> (String, Arc<PlayerRepository>) {
    let db = connect_and_migrate(memory_options()).await.unwrap();
    let repository = Arc::new(PlayerRepository::new(db));

    let (addr, server) =
        warp::serve(create_routes(repository.clone())).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    (format!("http://{}", addr), repository)
}

#[tokio::test]
async fn test_lost_round_is_recorded_for_new_player() {
    let (base_url, repository) = spawn_server().await;
    let mut session = SessionController::new(HttpPlayerApi::new(base_url), MemorySessionCache::new());

    let bob = session.login("bob").await.unwrap();
    assert_eq!((bob.wins, bob.losses), (0, 0));

    let round = "qxzjvk"
        .chars()
        .fold(round_with_word("Museum"), |r, c| guess(r, &c.to_string()));
    assert_eq!(round.status, RoundStatus::Lost);

    let recorded = session
        .record_outcome(round.outcome().unwrap())
        .await
        .unwrap();
    assert_eq!((recorded.losses, recorded.win_percentage), (1, 0));
    assert!(session.is_synced());

    let stored = repository.find("bob").await.unwrap();
    assert_eq!((stored.wins, stored.losses), (0, 1));
    assert_eq!(stored.win_percentage(), 0);
}

#[tokio::test]
async fn test_login_reuses_existing_record() {
    let (base_url, repository) = spawn_server().await;
    repository.create("alice", 3, 1).await.unwrap();

    let mut session = SessionController::new(HttpPlayerApi::new(base_url), MemorySessionCache::new());
    let alice = session.login("alice").await.unwrap();
    assert_eq!((alice.wins, alice.losses, alice.win_percentage), (3, 1, 75));

    let after_win = session.record_outcome(RoundOutcome::Win).await.unwrap();
    assert_eq!((after_win.wins, after_win.win_percentage), (4, 80));
    assert_eq!(repository.find("alice").await.unwrap().wins, 4);
}

#[tokio::test]
async fn test_http_api_maps_status_codes() {
    let (base_url, _repository) = spawn_server().await;
    let api = HttpPlayerApi::new(base_url);

    assert_eq!(
        api.get_player("nonexistent").await,
        Err(PlayerError::not_found("nonexistent"))
    );

    api.create_player("carol").await.unwrap();
    assert_eq!(
        api.create_player("carol").await,
        Err(PlayerError::conflict("carol"))
    );

    assert_eq!(
        api.update_player_stats("ghost", 1, 0).await,
        Err(PlayerError::not_found("ghost"))
    );

    let updated = api.update_player_stats("carol", 3, 1).await.unwrap();
    assert_eq!(updated.win_percentage, 75);
    assert_eq!(api.get_player("carol").await.unwrap(), updated);

    // Names with reserved URL characters survive the query string
    api.create_player("d&e f").await.unwrap();
    assert_eq!(api.get_player("d&e f").await.unwrap().player_name, "d&e f");
}
