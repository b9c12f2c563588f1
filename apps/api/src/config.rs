use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Headless browser used by the PDF renderer (chromium, google-chrome, ...).
    pub browser_bin: String,
    pub render_timeout: Duration,
    /// Editor sessions untouched this long are dropped.
    pub session_idle_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            browser_bin: std::env::var("BROWSER_BIN").unwrap_or_else(|_| "chromium".to_string()),
            render_timeout: Duration::from_secs(
                std::env::var("RENDER_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("RENDER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            session_idle_timeout: Duration::from_secs(
                std::env::var("SESSION_IDLE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse::<u64>()
                    .context("SESSION_IDLE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
