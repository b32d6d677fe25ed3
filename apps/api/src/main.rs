mod cache;
mod config;
mod errors;
mod games;
mod live_data;
mod llm_client;
mod recap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::cooldown::RefreshCooldown;
use crate::cache::{CacheStore, FsStorage, SystemClock};
use crate::config::Config;
use crate::live_data::LiveDataClient;
use crate::llm_client::LlmClient;
use crate::recap::composer::{prompt_from_file, DEFAULT_TONE};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "recap-api", version, about = "NBA game listings and AI recaps")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print the recap prompt for a box-score JSON file
    Prompt {
        /// Path to a box-score JSON document
        file: PathBuf,
        /// Writing style passed through to the generator
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Prompt { file, tone } => {
            init_tracing(&std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()));
            println!("{}", prompt_from_file(&file, &tone)?);
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting NBA Recap API v{}", env!("CARGO_PKG_VERSION"));

    let feed = Arc::new(LiveDataClient::new(config.live_data_url.clone()));
    info!("Live data client initialized ({})", config.live_data_url);

    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let cache = CacheStore::new(
        Arc::new(FsStorage::new(&config.cache_dir)),
        Arc::new(SystemClock),
    );
    info!("Cache directory: {}", config.cache_dir);

    let refresh_cooldown = Arc::new(RefreshCooldown::new(config.refresh_cooldown));

    let cors = build_cors(&config.cors_origins)?;

    let state = AppState {
        config: config.clone(),
        feed,
        writer: Arc::new(llm),
        cache,
        refresh_cooldown,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}
