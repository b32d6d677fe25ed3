//! Axum route handlers for the Games API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::games::models::{Game, GameSummary, PromptPreview, RefreshResponse};
use crate::games::service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    pub tone: Option<String>,
}

/// GET /games/today
pub async fn handle_games_today(
    State(state): State<AppState>,
) -> Result<Json<Vec<Game>>, AppError> {
    Ok(Json(service::list_todays_games(&state).await?))
}

/// POST /games/refresh
///
/// Re-fetches the upstream scoreboard. 429 with `Retry-After` inside the cooldown.
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    Ok(Json(service::refresh_scoreboard(&state).await?))
}

/// GET /games/:id/summary
pub async fn handle_game_summary(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSummary>, AppError> {
    Ok(Json(service::get_or_generate_summary(&state, &game_id).await?))
}

/// GET /games/:id/prompt?tone=
pub async fn handle_game_prompt(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Query(query): Query<PromptQuery>,
) -> Result<Json<PromptPreview>, AppError> {
    let tone = query.tone.as_deref().filter(|t| !t.trim().is_empty());
    Ok(Json(service::preview_prompt(&state, &game_id, tone).await?))
}
