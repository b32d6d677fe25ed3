use anyhow::{Context, Result};

use crate::live_data::DEFAULT_BASE_URL;
use crate::llm_client::ANTHROPIC_API_URL;
use crate::recap::composer::DEFAULT_TONE;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub live_data_url: String,
    pub cache_dir: String,
    pub refresh_cooldown: chrono::Duration,
    pub cors_origins: Vec<String>,
    pub recap_tone: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: env_or("ANTHROPIC_API_URL", ANTHROPIC_API_URL),
            live_data_url: env_or("NBA_LIVE_DATA_URL", DEFAULT_BASE_URL),
            cache_dir: env_or("CACHE_DIR", "cache"),
            refresh_cooldown: parse_cooldown(&env_or("REFRESH_COOLDOWN_SECS", "60"))?,
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            recap_tone: env_or("RECAP_TONE", DEFAULT_TONE),
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_cooldown(raw: &str) -> Result<chrono::Duration> {
    let secs = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|s| *s >= 0)
        .context("REFRESH_COOLDOWN_SECS must be a whole number of seconds")?;
    chrono::Duration::try_seconds(secs).context("REFRESH_COOLDOWN_SECS is too large")
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
