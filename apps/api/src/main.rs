mod config;
mod db;
mod errors;
mod favorites;
mod llm_client;
mod models;
mod places;
mod reviews;
mod routes;
mod search;
mod sorter;
mod state;
mod suggest;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::places::PlacesClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggest::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting QuickPick API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.openrouter_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize Places client
    let places = PlacesClient::new(config.google_places_api_key.clone());
    info!("Places client initialized");

    // Initialize weather client (keyless Open-Meteo)
    let weather = WeatherClient::new();

    // Build app state
    let state = AppState {
        db,
        llm,
        places,
        weather,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default filter directive when `RUST_LOG` is unset. Tracing targets carry
/// the crate's module path, so the hyphenated package name must be mapped to
/// its underscore form or the directive matches nothing.
fn default_log_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directive_targets_module_path() {
        let directive = default_log_directive("info");
        assert_eq!(directive, "quickpick_api=info");
        assert!(!directive.contains('-'));
    }

    #[test]
    fn test_default_log_directive_is_a_valid_filter() {
        assert!(EnvFilter::try_new(default_log_directive("debug")).is_ok());
    }
}
