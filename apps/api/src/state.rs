use std::sync::Arc;

use crate::cache::cooldown::RefreshCooldown;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::live_data::GameFeed;
use crate::llm_client::RecapWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Upstream scoreboard / box-score source. Default: LiveDataClient.
    pub feed: Arc<dyn GameFeed>,
    /// Recap generator. Default: LlmClient.
    pub writer: Arc<dyn RecapWriter>,
    pub cache: CacheStore,
    pub refresh_cooldown: Arc<RefreshCooldown>,
}
