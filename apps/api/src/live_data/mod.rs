/// Live data client, the only module that talks to the NBA live-data CDN.
///
/// Responses are handed back as raw JSON. Interpreting them is left to the
/// recap pipeline and the game listing so upstream schema drift degrades to
/// missing fields instead of decode failures.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://cdn.nba.com/static/json/liveData";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "nba-recap-api/0.1";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("not found upstream: {0}")]
    NotFound(String),

    #[error("upstream body for {url} is not JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of raw scoreboard and box-score documents.
#[async_trait]
pub trait GameFeed: Send + Sync {
    /// Today's scoreboard.
    async fn scoreboard(&self) -> Result<Value, FeedError>;

    /// Full box score for one game.
    async fn boxscore(&self, game_id: &str) -> Result<Value, FeedError>;
}

#[derive(Debug, Clone)]
pub struct LiveDataClient {
    client: Client,
    base_url: String,
}

impl LiveDataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, url: String) -> Result<Value, FeedError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FeedError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        // The CDN answers 403 for objects it has never published.
        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Err(FeedError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FeedError::Decode { url, source })
    }
}

#[async_trait]
impl GameFeed for LiveDataClient {
    async fn scoreboard(&self) -> Result<Value, FeedError> {
        self.get_json(format!(
            "{}/scoreboard/todaysScoreboard_00.json",
            self.base_url
        ))
        .await
    }

    async fn boxscore(&self, game_id: &str) -> Result<Value, FeedError> {
        self.get_json(format!("{}/boxscore/boxscore_{game_id}.json", self.base_url))
            .await
    }
}
