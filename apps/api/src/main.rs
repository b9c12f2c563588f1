mod config;
mod editor;
mod errors;
mod llm_client;
mod render;
mod routes;
mod state;
mod suggestion;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::session::SessionRegistry;
use crate::llm_client::LlmClient;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestion::service::LlmSuggestionService;

const SESSION_REAP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM-backed suggestion service
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let suggester = Arc::new(LlmSuggestionService::new(llm));

    // Initialize PDF renderer
    let renderer = PdfRenderer::new(config.browser_bin.clone(), config.render_timeout);
    info!(
        "PDF renderer: {} (timeout {}s)",
        config.browser_bin,
        config.render_timeout.as_secs()
    );

    // Editor sessions live in memory; a reaper drops abandoned ones
    let sessions = SessionRegistry::default();
    sessions.spawn_reaper(config.session_idle_timeout, SESSION_REAP_INTERVAL);
    info!(
        "Session idle timeout: {}s",
        config.session_idle_timeout.as_secs()
    );

    let state = AppState {
        sessions,
        suggester,
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the configured browser origins.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS origins: {:?}", config.allowed_origins);

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
