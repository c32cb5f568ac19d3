use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use game_types::{
    CreatePlayerRequest, ErrorResponse, PlayerError, PlayerQuery, PlayerStats, UpdatePlayerRequest,
};

/// Remote player record operations used by the session controller.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    async fn get_player(&self, player_name: &str) -> Result<PlayerStats, PlayerError>;

    async fn create_player(&self, player_name: &str) -> Result<PlayerStats, PlayerError>;

    async fn update_player_stats(
        &self,
        player_name: &str,
        wins: u32,
        losses: u32,
    ) -> Result<PlayerStats, PlayerError>;
}

/// `PlayerApi` over the Hangman HTTP/JSON service.
#[derive(Debug, Clone)]
pub struct HttpPlayerApi {
    client: Client,
    base_url: String,
}

impl HttpPlayerApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn player_url(&self) -> String {
        format!("{}/player", self.base_url)
    }

    async fn parse(response: Response, player_name: &str) -> Result<PlayerStats, PlayerError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<PlayerStats>()
                .await
                .map(PlayerStats::normalized)
                .map_err(PlayerError::backend);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("Error {}", status),
        };

        Err(match status {
            StatusCode::NOT_FOUND => PlayerError::not_found(player_name),
            StatusCode::CONFLICT => PlayerError::conflict(player_name),
            StatusCode::BAD_REQUEST => PlayerError::validation(message),
            _ => PlayerError::backend(message),
        })
    }
}

#[async_trait]
impl PlayerApi for HttpPlayerApi {
    async fn get_player(&self, player_name: &str) -> Result<PlayerStats, PlayerError> {
        let query = PlayerQuery {
            player_name: Some(player_name.to_string()),
        };

        let response = self
            .client
            .get(self.player_url())
            .query(&query)
            .send()
            .await
            .map_err(PlayerError::backend)?;

        Self::parse(response, player_name).await
    }

    async fn create_player(&self, player_name: &str) -> Result<PlayerStats, PlayerError> {
        let response = self
            .client
            .post(self.player_url())
            .json(&CreatePlayerRequest::new(player_name))
            .send()
            .await
            .map_err(PlayerError::backend)?;

        Self::parse(response, player_name).await
    }

    async fn update_player_stats(
        &self,
        player_name: &str,
        wins: u32,
        losses: u32,
    ) -> Result<PlayerStats, PlayerError> {
        let response = self
            .client
            .put(self.player_url())
            .json(&UpdatePlayerRequest::new(player_name, wins, losses))
            .send()
            .await
            .map_err(PlayerError::backend)?;

        Self::parse(response, player_name).await
    }
}
