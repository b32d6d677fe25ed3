pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::games::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/games/today", get(handlers::handle_games_today))
        .route("/games/refresh", post(handlers::handle_refresh))
        .route("/games/:id/summary", get(handlers::handle_game_summary))
        .route("/games/:id/prompt", get(handlers::handle_game_prompt))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::cooldown::RefreshCooldown;
    use crate::cache::testing::FixedClock;
    use crate::cache::{CacheStore, MemoryStorage};
    use crate::config::Config;
    use crate::live_data::{FeedError, GameFeed};
    use crate::llm_client::{LlmError, RecapWriter};
    use crate::recap::composer::DEFAULT_TONE;

    const FINAL_ID: &str = "0022300561";
    const LIVE_ID: &str = "0022300563";

    struct FakeFeed {
        scoreboard_calls: AtomicUsize,
        boxscore_calls: AtomicUsize,
        boxscores: HashMap<String, Value>,
    }

    impl FakeFeed {
        fn new() -> Self {
            let mut boxscores = HashMap::new();
            boxscores.insert(FINAL_ID.to_string(), final_boxscore());
            boxscores.insert(
                LIVE_ID.to_string(),
                json!({ "game": { "gameId": LIVE_ID, "gameStatus": 2 } }),
            );
            Self {
                scoreboard_calls: AtomicUsize::new(0),
                boxscore_calls: AtomicUsize::new(0),
                boxscores,
            }
        }
    }

    #[async_trait]
    impl GameFeed for FakeFeed {
        async fn scoreboard(&self) -> Result<Value, FeedError> {
            self.scoreboard_calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({
                "scoreboard": {
                    "gameDate": "2024-01-15",
                    "games": [
                        {
                            "gameId": FINAL_ID,
                            "gameStatus": 3,
                            "homeTeam": { "teamName": "Warriors", "score": 115 },
                            "awayTeam": { "teamName": "Lakers", "score": 108 }
                        },
                        {
                            "gameId": LIVE_ID,
                            "gameStatus": 2,
                            "homeTeam": { "teamName": "Suns", "score": 60 },
                            "awayTeam": { "teamName": "Nuggets", "score": 64 }
                        }
                    ]
                }
            }))
        }

        async fn boxscore(&self, game_id: &str) -> Result<Value, FeedError> {
            self.boxscore_calls.fetch_add(1, Ordering::SeqCst);
            self.boxscores
                .get(game_id)
                .cloned()
                .ok_or_else(|| FeedError::NotFound(format!("boxscore_{game_id}.json")))
        }
    }

    #[derive(Default)]
    struct FakeWriter {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl RecapWriter for FakeWriter {
        async fn write_recap(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(LlmError::EmptyContent);
            }
            Ok("The Warriors held off the Lakers 115-108.".to_string())
        }
    }

    fn final_boxscore() -> Value {
        json!({
            "game": {
                "gameId": FINAL_ID,
                "gameStatus": 3,
                "gameTimeLocal": "2024-01-15T19:30:00-08:00",
                "arena": { "arenaName": "Chase Center", "arenaCity": "San Francisco" },
                "sellout": "1",
                "homeTeam": {
                    "teamCity": "Golden State",
                    "teamName": "Warriors",
                    "score": 115,
                    "statistics": {
                        "reboundsTotal": 44,
                        "turnoversTotal": 10,
                        "fieldGoalsPercentage": 0.45,
                        "threePointersPercentage": 0.35,
                        "leadChanges": 3
                    }
                },
                "awayTeam": {
                    "teamCity": "Los Angeles",
                    "teamName": "Lakers",
                    "score": 108,
                    "statistics": {
                        "reboundsTotal": 44,
                        "turnoversTotal": 4,
                        "fieldGoalsPercentage": 0.45,
                        "threePointersPercentage": 0.35
                    }
                }
            }
        })
    }

    struct Harness {
        router: Router,
        feed: Arc<FakeFeed>,
        writer: Arc<FakeWriter>,
        clock: Arc<FixedClock>,
    }

    fn harness_with(writer: FakeWriter) -> Harness {
        let feed = Arc::new(FakeFeed::new());
        let writer = Arc::new(writer);
        let clock = Arc::new(FixedClock::at("2024-01-16T04:00:00Z"));

        let config = Config {
            anthropic_api_key: "test".into(),
            anthropic_api_url: "http://localhost".into(),
            live_data_url: "http://localhost".into(),
            cache_dir: "unused".into(),
            refresh_cooldown: chrono::Duration::seconds(60),
            cors_origins: vec![],
            recap_tone: DEFAULT_TONE.into(),
            port: 0,
            rust_log: "debug".into(),
        };
        let state = AppState {
            config,
            feed: feed.clone(),
            writer: writer.clone(),
            cache: CacheStore::new(Arc::new(MemoryStorage::default()), clock.clone()),
            refresh_cooldown: Arc::new(RefreshCooldown::new(chrono::Duration::seconds(60))),
        };

        Harness {
            router: build_router(state),
            feed,
            writer,
            clock,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeWriter::default())
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "NBA Game Recaps API");

        let (status, body) = send(&h.router, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_games_today_fetches_once_then_uses_cache() {
        let h = harness();

        let (status, body) = send(&h.router, Method::GET, "/games/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["id"], FINAL_ID);
        assert_eq!(body[0]["homeScore"], 115);
        assert_eq!(body[0]["status"], "finished");
        assert_eq!(body[0]["date"], "January 15, 2024");
        assert_eq!(body[1]["status"], "in_progress");

        send(&h.router, Method::GET, "/games/today").await;
        assert_eq!(h.feed.scoreboard_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_is_rate_limited() {
        let h = harness();

        let (status, body) = send(&h.router, Method::POST, "/games/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["refreshed"], true);
        assert_eq!(body["gameCount"], 2);

        let response = h
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/games/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");

        h.clock.advance(chrono::Duration::seconds(60));
        let (status, _) = send(&h.router, Method::POST, "/games/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.feed.scoreboard_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_updates_listing_cache() {
        let h = harness();
        send(&h.router, Method::POST, "/games/refresh").await;
        send(&h.router, Method::GET, "/games/today").await;
        assert_eq!(h.feed.scoreboard_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summary_generated_once_then_cached() {
        let h = harness();
        let uri = format!("/games/{FINAL_ID}/summary");

        let (status, body) = send(&h.router, Method::GET, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gameId"], FINAL_ID);
        assert_eq!(body["summary"], "The Warriors held off the Lakers 115-108.");
        assert_eq!(body["generatedAt"], "2024-01-16T04:00:00Z");

        let (status, again) = send(&h.router, Method::GET, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(again, body);

        let prompts = h.writer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(h.feed.boxscore_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summary_prompt_carries_facts_in_order() {
        let h = harness();
        send(&h.router, Method::GET, &format!("/games/{FINAL_ID}/summary")).await;

        let prompts = h.writer.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.starts_with("Write a professional NBA recap paragraph.\n\nFacts:\n"));
        assert!(prompt.contains(
            "- Game was played in the evening\n\
             - Venue: Chase Center in San Francisco\n\
             - Arena was sold out\n\
             - Golden State Warriors: 115 points\n"
        ));
        assert!(prompt.contains("- Game was decided by 7 points\n"));
        assert!(prompt.contains("- Game had 3 lead change(s)\n"));
        assert!(prompt.contains("- Away team had 6 fewer turnovers\n"));
        assert!(!prompt.contains("rebounding"));
        assert!(prompt.ends_with("\n\nTone: neutral, ESPN-style"));
    }

    #[tokio::test]
    async fn test_summary_for_unfinished_game_is_422() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, &format!("/games/{LIVE_ID}/summary")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(h.writer.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unfinished_boxscore_is_not_cached() {
        let h = harness();
        let uri = format!("/games/{LIVE_ID}/summary");
        send(&h.router, Method::GET, &uri).await;
        send(&h.router, Method::GET, &uri).await;
        assert_eq!(h.feed.boxscore_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_summary_for_unknown_game_is_404() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/games/0000000000/summary").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_game_id_is_400() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/games/00223..0561/summary").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(h.feed.boxscore_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_writer_failure_is_500_and_not_cached() {
        let h = harness_with(FakeWriter {
            fail: true,
            ..Default::default()
        });
        let uri = format!("/games/{FINAL_ID}/summary");

        let (status, body) = send(&h.router, Method::GET, &uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");

        send(&h.router, Method::GET, &uri).await;
        assert_eq!(h.writer.prompts.lock().unwrap().len(), 2);
        // the final box score itself was cached on the first attempt
        assert_eq!(h.feed.boxscore_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_preview_with_custom_tone() {
        let h = harness();
        let uri = format!("/games/{FINAL_ID}/prompt?tone=excited%2C%20highlight-reel%20style");

        let (status, body) = send(&h.router, Method::GET, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["facts"][0], "Game was played in the evening");
        assert!(body["prompt"]
            .as_str()
            .unwrap()
            .ends_with("Tone: excited, highlight-reel style"));
        assert!(h.writer.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_preview_defaults_tone() {
        let h = harness();
        let (_, body) = send(&h.router, Method::GET, &format!("/games/{FINAL_ID}/prompt")).await;
        assert!(body["prompt"]
            .as_str()
            .unwrap()
            .ends_with("Tone: neutral, ESPN-style"));
    }
}
