use anyhow::{Context, Result};

use crate::sorter::DEFAULT_DISTANCE_LIMIT_KM;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openrouter_api_key: String,
    pub google_places_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Cutoff for distance sorting, in kilometers. A product knob, not an
    /// algorithm constant; defaults to 30.
    pub distance_limit_km: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            google_places_api_key: require_env("GOOGLE_PLACES_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            distance_limit_km: std::env::var("DISTANCE_LIMIT_KM")
                .unwrap_or_else(|_| DEFAULT_DISTANCE_LIMIT_KM.to_string())
                .parse::<f64>()
                .context("DISTANCE_LIMIT_KM must be a number of kilometers")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
