//! Game service: cache-first access to listings, box scores and recaps.
//!
//! Summary flow: summary cache → box score (cache, else feed) → finished? →
//!               relevance filter → prompt → recap writer → summary cache.

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::cooldown::retry_after_secs;
use crate::cache::{boxscore_key, summary_key, Clock, SCOREBOARD_KEY};
use crate::errors::AppError;
use crate::games::listing::games_from_scoreboard;
use crate::games::models::{Game, GameStatus, GameSummary, PromptPreview, RefreshResponse};
use crate::recap::composer::compose_prompt;
use crate::recap::fields::Fields;
use crate::recap::relevance::filter_relevant_statistics;
use crate::state::AppState;

/// Game ids index cache files, so only plain ASCII alphanumerics are accepted.
pub fn validate_game_id(game_id: &str) -> Result<(), AppError> {
    if game_id.is_empty() || !game_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!("Invalid game id '{game_id}'")));
    }
    Ok(())
}

/// Today's games from the cached scoreboard, fetching it on a cold cache.
pub async fn list_todays_games(state: &AppState) -> Result<Vec<Game>, AppError> {
    let scoreboard = match state.cache.get::<Value>(SCOREBOARD_KEY).await? {
        Some(entry) => entry.data,
        None => {
            info!("No cached scoreboard, fetching from upstream");
            let raw = state.feed.scoreboard().await?;
            state.cache.put(SCOREBOARD_KEY, &raw).await?;
            raw
        }
    };
    Ok(games_from_scoreboard(&scoreboard))
}

/// Re-fetches the scoreboard, at most once per cooldown window.
pub async fn refresh_scoreboard(state: &AppState) -> Result<RefreshResponse, AppError> {
    let now = state.cache.clock().now();
    if let Err(remaining) = state.refresh_cooldown.try_begin(now) {
        let retry_after_secs = retry_after_secs(remaining);
        info!("Refresh rejected, cooling down for {retry_after_secs}s");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let raw = state.feed.scoreboard().await?;
    let refreshed_at = state.cache.put(SCOREBOARD_KEY, &raw).await?;
    let game_count = games_from_scoreboard(&raw).len();
    info!("Scoreboard refreshed: {game_count} games");

    Ok(RefreshResponse {
        refreshed: true,
        game_count,
        refreshed_at,
    })
}

/// Returns the recap for a finished game, generating and caching it on first request.
pub async fn get_or_generate_summary(
    state: &AppState,
    game_id: &str,
) -> Result<GameSummary, AppError> {
    validate_game_id(game_id)?;

    if let Some(entry) = state.cache.get::<GameSummary>(&summary_key(game_id)).await? {
        return Ok(entry.data);
    }

    let boxscore = load_boxscore(state, game_id).await?;
    if game_status(&boxscore) != GameStatus::Finished {
        return Err(AppError::UnprocessableEntity(format!(
            "Game {game_id} has not finished; no recap is available yet"
        )));
    }

    let facts = filter_relevant_statistics(&boxscore);
    if facts.is_empty() {
        warn!("Box score for {game_id} produced no facts");
    }
    let prompt = compose_prompt(&facts, &state.config.recap_tone);

    info!("Generating recap for game {game_id} from {} facts", facts.len());
    let summary = state.writer.write_recap(&prompt).await?;

    let summary = GameSummary {
        game_id: game_id.to_string(),
        summary,
        generated_at: state.cache.clock().now(),
    };
    state.cache.put(&summary_key(game_id), &summary).await?;
    Ok(summary)
}

/// Facts and prompt for a game as they would be sent to the writer.
pub async fn preview_prompt(
    state: &AppState,
    game_id: &str,
    tone: Option<&str>,
) -> Result<PromptPreview, AppError> {
    validate_game_id(game_id)?;

    let boxscore = load_boxscore(state, game_id).await?;
    let facts = filter_relevant_statistics(&boxscore);
    let prompt = compose_prompt(&facts, tone.unwrap_or(state.config.recap_tone.as_str()));

    Ok(PromptPreview {
        game_id: game_id.to_string(),
        facts,
        prompt,
    })
}

/// Box score from cache, else from the feed. Only final box scores are cached;
/// live ones keep changing.
async fn load_boxscore(state: &AppState, game_id: &str) -> Result<Value, AppError> {
    let key = boxscore_key(game_id);
    if let Some(entry) = state.cache.get::<Value>(&key).await? {
        return Ok(entry.data);
    }

    let raw = state.feed.boxscore(game_id).await?;
    if game_status(&raw) == GameStatus::Finished {
        state.cache.put(&key, &raw).await?;
    }
    Ok(raw)
}

fn game_status(boxscore: &Value) -> GameStatus {
    let code = boxscore
        .section("game")
        .map(|g| g.int_or_zero("gameStatus"))
        .unwrap_or(0);
    GameStatus::from_code(code)
}
