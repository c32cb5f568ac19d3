use std::convert::Infallible;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use warp::Filter;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;

use game_persistence::repositories::PlayerRepository;
use game_types::{
    CreatePlayerRequest, ErrorResponse, HealthResponse, PlayerError, PlayerQuery, PlayerStats,
    UpdatePlayerRequest,
};

pub mod config;

const MAX_BODY_BYTES: u64 = 16 * 1024;

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

/// Request body over `MAX_BODY_BYTES`, whether declared up front or found
/// after reading a chunked body.
#[derive(Debug)]
struct BodyTooLarge;

impl warp::reject::Reject for BodyTooLarge {}

pub fn create_routes(
    player_repository: Arc<PlayerRepository>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let player_repository_filter = warp::any().map({
        let player_repository = player_repository.clone();
        move || player_repository.clone()
    });

    let player_path = warp::path("player").and(warp::path::end());

    // GET /player?playerName=NAME
    let get_player = player_path
        .and(warp::get())
        .and(warp::query::<PlayerQuery>())
        .and(player_repository_filter.clone())
        .and_then(handle_get_player);

    // POST /player
    let create_player = player_path
        .and(warp::post())
        .and(limited_body())
        .and(player_repository_filter.clone())
        .and_then(handle_create_player);

    // PUT /player
    let update_player = player_path
        .and(warp::put())
        .and(limited_body())
        .and(player_repository_filter.clone())
        .and_then(handle_update_player);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&HealthResponse { ok: true }));

    let root = warp::path::end()
        .and(warp::get())
        .map(|| "Hangman API is running");

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT"]);

    get_player
        .or(create_player)
        .or(update_player)
        .or(health)
        .or(root)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("hangman"))
}

/// Buffers the request body up to `MAX_BODY_BYTES`. A `Content-Length` is
/// not required, so chunked uploads are accepted.
fn limited_body() -> impl Filter<Extract = (Bytes,), Error = warp::Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(|length: Option<u64>| async move {
            match length {
                Some(length) if length > MAX_BODY_BYTES => {
                    Err(warp::reject::custom(BodyTooLarge))
                }
                _ => Ok(()),
            }
        })
        .untuple_one()
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            if body.len() as u64 > MAX_BODY_BYTES {
                Err(warp::reject::custom(BodyTooLarge))
            } else {
                Ok(body)
            }
        })
}

/// Turns warp rejections into the same `{message}` body the handlers use.
async fn handle_rejection(err: warp::Rejection) -> Result<JsonReply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found")
    } else if err.find::<BodyTooLarge>().is_some()
        || err.find::<warp::reject::PayloadTooLarge>().is_some()
    {
        (StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
    } else if err.find::<warp::reject::InvalidQuery>().is_some()
        || err.find::<warp::reject::InvalidHeader>().is_some()
        || err.find::<warp::reject::LengthRequired>().is_some()
    {
        (StatusCode::BAD_REQUEST, "invalid request")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "server error")
    };

    Ok(json_reply(
        &ErrorResponse {
            message: message.to_string(),
        },
        status,
    ))
}

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(err: &PlayerError) -> JsonReply {
    let (status, message) = match err {
        PlayerError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        PlayerError::Conflict { .. } => (StatusCode::CONFLICT, "player already exists".to_string()),
        PlayerError::NotFound { .. } => (StatusCode::NOT_FOUND, "player not found".to_string()),
        PlayerError::Backend { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
        }
    };

    json_reply(&ErrorResponse { message }, status)
}

/// Bodies are parsed by hand so type mismatches become a 400 with a JSON
/// message rather than a bare rejection.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, PlayerError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!("Rejected request body: {}", err);
        PlayerError::validation("invalid JSON body")
    })
}

async fn handle_get_player(
    query: PlayerQuery,
    player_repository: Arc<PlayerRepository>,
) -> Result<JsonReply, warp::Rejection> {
    let player_name = match query.validate() {
        Ok(name) => name,
        Err(err) => return Ok(error_reply(&err)),
    };

    match player_repository.find(player_name).await {
        Ok(record) => Ok(json_reply(&PlayerStats::from(record), StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_create_player(
    body: Bytes,
    player_repository: Arc<PlayerRepository>,
) -> Result<JsonReply, warp::Rejection> {
    let request = match parse_body::<CreatePlayerRequest>(&body) {
        Ok(request) => request,
        Err(err) => return Ok(error_reply(&err)),
    };

    let (player_name, wins, losses) = match request.validate() {
        Ok(fields) => fields,
        Err(err) => return Ok(error_reply(&err)),
    };

    match player_repository.create(player_name, wins, losses).await {
        Ok(record) => {
            tracing::info!("Created player {}", record.player_name);
            Ok(json_reply(&PlayerStats::from(record), StatusCode::CREATED))
        }
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_update_player(
    body: Bytes,
    player_repository: Arc<PlayerRepository>,
) -> Result<JsonReply, warp::Rejection> {
    let request = match parse_body::<UpdatePlayerRequest>(&body) {
        Ok(request) => request,
        Err(err) => return Ok(error_reply(&err)),
    };

    let (player_name, wins, losses) = match request.validate() {
        Ok(fields) => fields,
        Err(err) => return Ok(error_reply(&err)),
    };

    match player_repository.update_stats(player_name, wins, losses).await {
        Ok(record) => Ok(json_reply(&PlayerStats::from(record), StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use serde_json::json;

    async fn create_test_app()
    -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        // Create in-memory database for tests
        let db = game_persistence::connection::connect_to_memory_database()
            .await
            .unwrap();
        Migrator::up(&db, None).await.unwrap();
        create_routes(Arc::new(PlayerRepository::new(db)))
    }

    /// Routes over a database that was never migrated, so every query fails.
    async fn create_broken_app()
    -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let db = game_persistence::connection::connect_to_memory_database()
            .await
            .unwrap();
        create_routes(Arc::new(PlayerRepository::new(db)))
    }

    fn body_json(response: &warp::http::Response<Bytes>) -> serde_json::Value {
        serde_json::from_slice(response.body()).expect("Response should be JSON")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = create_test_app().await;

        let response = warp::test::request().method("GET").path("/").reply(&app).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "Hangman API is running");
    }

    #[tokio::test]
    async fn test_create_then_get_player() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("POST")
            .path("/player")
            .json(&json!({ "playerName": "alice" }))
            .reply(&app)
            .await;

        assert_eq!(response.status(), 201);
        assert_eq!(
            body_json(&response),
            json!({ "playerName": "alice", "wins": 0, "losses": 0, "winPercentage": 0 })
        );

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=alice")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response)["playerName"], "alice");
    }

    #[tokio::test]
    async fn test_create_with_initial_tallies() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("POST")
            .path("/player")
            .json(&json!({ "playerName": "carol", "wins": 1, "losses": 2 }))
            .reply(&app)
            .await;

        assert_eq!(response.status(), 201);
        assert_eq!(body_json(&response)["winPercentage"], 33);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let app = create_test_app().await;

        for expected in [201, 409] {
            let response = warp::test::request()
                .method("POST")
                .path("/player")
                .json(&json!({ "playerName": "alice", "wins": 4 }))
                .reply(&app)
                .await;
            assert_eq!(response.status(), expected);
        }

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=alice")
            .reply(&app)
            .await;
        assert_eq!(body_json(&response)["wins"], 4);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let app = create_test_app().await;

        for body in [json!({}), json!({ "playerName": "" }), json!({ "wins": 1 })] {
            let response = warp::test::request()
                .method("POST")
                .path("/player")
                .json(&body)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 400, "body {}", body);
            assert_eq!(body_json(&response)["message"], "playerName required");
        }
    }

    #[tokio::test]
    async fn test_get_missing_name_and_unknown_player() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/player")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["message"], "missing playerName");

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=nonexistent")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
        assert_eq!(body_json(&response)["message"], "player not found");
    }

    #[tokio::test]
    async fn test_update_replaces_stats() {
        let app = create_test_app().await;

        warp::test::request()
            .method("POST")
            .path("/player")
            .json(&json!({ "playerName": "alice" }))
            .reply(&app)
            .await;

        let response = warp::test::request()
            .method("PUT")
            .path("/player")
            .json(&json!({ "playerName": "alice", "wins": 3, "losses": 1 }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_json(&response),
            json!({ "playerName": "alice", "wins": 3, "losses": 1, "winPercentage": 75 })
        );

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=alice")
            .reply(&app)
            .await;
        assert_eq!(body_json(&response)["winPercentage"], 75);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_bodies() {
        let app = create_test_app().await;

        let bodies = [
            json!({ "playerName": "alice", "wins": 1 }),
            json!({ "playerName": "alice", "wins": "1", "losses": 0 }),
            json!({ "playerName": "alice", "wins": -1, "losses": 0 }),
            json!({ "wins": 1, "losses": 0 }),
        ];

        for body in bodies {
            let response = warp::test::request()
                .method("PUT")
                .path("/player")
                .json(&body)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 400, "body {}", body);
        }

        let response = warp::test::request()
            .method("PUT")
            .path("/player")
            .body("not json")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_update_unknown_player_is_not_found() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("PUT")
            .path("/player")
            .json(&json!({ "playerName": "ghost", "wins": 1, "losses": 0 }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=ghost")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let app = create_broken_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/player?playerName=alice")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 500);
        assert_eq!(body_json(&response)["message"], "server error");

        let response = warp::test::request()
            .method("POST")
            .path("/player")
            .json(&json!({ "playerName": "alice" }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 500);
    }

    #[tokio::test]
    async fn test_rejections_use_json_message_body() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/nowhere")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
        assert_eq!(body_json(&response)["message"], "not found");

        let response = warp::test::request()
            .method("DELETE")
            .path("/player")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 405);
        assert_eq!(body_json(&response)["message"], "method not allowed");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let app = create_test_app().await;

        let name = "x".repeat(MAX_BODY_BYTES as usize);
        let response = warp::test::request()
            .method("POST")
            .path("/player")
            .json(&json!({ "playerName": name }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 413);
        assert_eq!(body_json(&response)["message"], "request body too large");
    }
}
