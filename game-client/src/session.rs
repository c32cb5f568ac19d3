use tracing::{error, info, warn};

use crate::api::PlayerApi;
use crate::session_cache::SessionCache;
use game_types::{PlayerError, PlayerStats, Round, RoundOutcome};

/// Ties round outcomes to the remote player record and keeps the logged-in
/// player in the local session cache.
///
/// Outcomes are applied optimistically: the local tally and cache change
/// first, then the full totals are pushed. A failed push leaves the session
/// unsynced; the next push (another outcome or [`SessionController::sync`])
/// replaces the remote totals with the local ones.
pub struct SessionController<A, C> {
    api: A,
    cache: C,
    session: Option<PlayerStats>,
    synced: bool,
}

impl<A: PlayerApi, C: SessionCache> SessionController<A, C> {
    pub fn new(api: A, cache: C) -> Self {
        Self {
            api,
            cache,
            session: None,
            synced: true,
        }
    }

    /// Load the last logged-in player from the cache. A cache that cannot be
    /// read is logged and treated as empty.
    pub fn restore(&mut self) -> Option<&PlayerStats> {
        match self.cache.load() {
            Ok(Some(player)) => {
                info!("Restored session for {}", player.player_name);
                self.session = Some(player);
                self.synced = true;
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to restore saved player: {}", err),
        }
        self.session.as_ref()
    }

    pub fn current(&self) -> Option<&PlayerStats> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// False after a remote update failed and before a later push succeeded.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetch the player, creating it with zero tallies if it does not exist
    /// yet. Any other failure propagates and leaves the session unchanged.
    pub async fn login(&mut self, player_name: &str) -> Result<PlayerStats, PlayerError> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(PlayerError::validation("Please enter a name"));
        }
        self.settle_pending().await;

        let player = match self.api.get_player(player_name).await {
            Ok(player) => player,
            Err(err) if err.is_not_found() => {
                info!("Creating new player {}", player_name);
                self.api.create_player(player_name).await?
            }
            Err(err) => return Err(err),
        };

        self.replace_session(Some(player.clone()));
        self.persist_locally();
        Ok(player)
    }

    pub async fn logout(&mut self) {
        self.settle_pending().await;
        self.replace_session(None);
        if let Err(err) = self.cache.clear() {
            warn!("Failed to clear session cache: {}", err);
        }
    }

    /// Apply a guess and record the outcome if this guess finished the round.
    /// Guesses on a round that was already over record nothing.
    pub async fn apply_guess(&mut self, round: Round, letter: &str) -> Round {
        let was_over = round.is_over();
        let round = game_core::guess(round, letter);

        if !was_over {
            if let Some(outcome) = round.outcome() {
                self.record_outcome(outcome).await;
            }
        }
        round
    }

    /// Count a finished round for the active player. Returns `None` when
    /// nobody is logged in.
    pub async fn record_outcome(&mut self, outcome: RoundOutcome) -> Option<PlayerStats> {
        let player = self.session.as_mut()?;
        match outcome {
            RoundOutcome::Win => player.wins += 1,
            RoundOutcome::Loss => player.losses += 1,
        }
        let updated = player.clone().normalized();
        *player = updated.clone();

        self.persist_locally();
        self.push(&updated).await;

        self.session.clone()
    }

    /// Re-push the local totals if an earlier update failed.
    pub async fn sync(&mut self) -> Result<(), PlayerError> {
        if self.synced {
            return Ok(());
        }
        let Some(player) = self.session.clone() else {
            self.synced = true;
            return Ok(());
        };

        if self.push(&player).await {
            Ok(())
        } else {
            Err(PlayerError::backend("player stats are still out of sync"))
        }
    }

    async fn push(&mut self, player: &PlayerStats) -> bool {
        match self
            .api
            .update_player_stats(&player.player_name, player.wins, player.losses)
            .await
        {
            Ok(stored) => {
                self.session = Some(stored);
                self.synced = true;
                self.persist_locally();
                true
            }
            Err(err) => {
                error!(
                    "Failed to update stats for {} (local wins={} losses={}): {}",
                    player.player_name, player.wins, player.losses, err
                );
                self.synced = false;
                false
            }
        }
    }

    /// One more push for totals a failed update left behind.
    async fn settle_pending(&mut self) {
        if !self.synced {
            let _ = self.sync().await;
        }
    }

    fn replace_session(&mut self, next: Option<PlayerStats>) {
        if let (false, Some(player)) = (self.synced, &self.session) {
            warn!(
                "Dropping unsynced stats for {} (wins={} losses={})",
                player.player_name, player.wins, player.losses
            );
        }
        self.session = next;
        self.synced = true;
    }

    fn persist_locally(&self) {
        let result = match &self.session {
            Some(player) => self.cache.save(player),
            None => self.cache.clear(),
        };
        if let Err(err) = result {
            warn!("Failed to write session cache: {}", err);
        }
    }
}
