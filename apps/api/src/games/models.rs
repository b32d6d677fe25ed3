use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recap::Fact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Finished,
}

impl GameStatus {
    /// Maps the feed's numeric `gameStatus` (1 scheduled, 2 live, 3 final).
    /// Unknown codes are treated as not yet started.
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => GameStatus::InProgress,
            3 => GameStatus::Finished,
            _ => GameStatus::Scheduled,
        }
    }
}

/// One row of the game listing returned to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub away_team: String,
    pub home_team: String,
    pub away_score: Option<i64>,
    pub home_score: Option<i64>,
    pub date: String,
    pub status: GameStatus,
}

/// A generated recap. Cached permanently once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: String,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub refreshed: bool,
    pub game_count: usize,
    pub refreshed_at: DateTime<Utc>,
}

/// Prompt preview for a game, without calling the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPreview {
    pub game_id: String,
    pub facts: Vec<Fact>,
    pub prompt: String,
}
