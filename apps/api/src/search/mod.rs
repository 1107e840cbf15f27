//! Search flow — free-text prompt in, ranked venue list out.
//!
//! The prompt is turned into structured parameters by the LLM, the
//! parameters become a Text Search query, and the provider's hits come back
//! already normalized into canonical records. Sorting happens last, server
//! side, so repeated requests with the same inputs return the same order.

pub mod prompts;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::favorites::record_search;
use crate::llm_client::LlmClient;
use crate::models::place::{LatLng, PlaceRecord};
use crate::places::SearchOptions;
use crate::search::prompts::{prompt_parse_system, PROMPT_PARSE_PROMPT};
use crate::sorter::{apply_sort, SortCriterion};
use crate::state::AppState;

/// Structured search parameters extracted from the free-text prompt.
/// The model may omit any of them or send `null`; both normalize to empty
/// strings rather than failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedPrompt {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub specifications: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub location: String,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub prompt: String,
    /// When present, the prompt is recorded into the user's search history.
    pub user_id: Option<Uuid>,
    /// Server-side ordering of the result list. Absent = provider order.
    pub sort: Option<SortCriterion>,
    /// Required by `sort = "distance_asc"`; ignored otherwise.
    pub viewer_position: Option<LatLng>,
    pub min_rating: Option<f64>,
    pub max_price_level: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub parsed: ParsedPrompt,
    pub places: Vec<PlaceRecord>,
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation(
            "prompt is required and must be a non-empty string".to_string(),
        ));
    }

    // History insert failure must not fail the search itself.
    if let Some(user_id) = req.user_id {
        record_search(&state.db, user_id, prompt).await;
    }

    let parsed = parse_user_prompt(&state.llm, prompt).await?;
    let query = build_query(&parsed);
    debug!("Search query built: {query}");

    let options = SearchOptions {
        query: query.clone(),
        location: None,
        radius_m: None,
        min_rating: req.min_rating,
        max_price_level: req.max_price_level,
    };
    let places = state
        .places
        .search(&options)
        .await
        .map_err(|e| AppError::Places(e.to_string()))?;

    let places = apply_sort(
        &places,
        req.sort,
        req.viewer_position,
        state.config.distance_limit_km,
    )?;

    Ok(Json(SearchResponse {
        query,
        parsed,
        places,
    }))
}

/// Extracts category/specifications/location from the user's prompt.
pub async fn parse_user_prompt(llm: &LlmClient, prompt: &str) -> Result<ParsedPrompt, AppError> {
    let user_prompt = PROMPT_PARSE_PROMPT.replace("{prompt}", prompt);
    llm.call_json(&user_prompt, &prompt_parse_system())
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse search prompt: {e}")))
}

/// Concatenates the extracted parts into the provider query, skipping
/// whatever the prompt did not mention.
pub fn build_query(parsed: &ParsedPrompt) -> String {
    let mut query = parsed.category.trim().to_string();
    for part in [parsed.specifications.trim(), parsed.location.trim()] {
        if !part.is_empty() {
            if !query.is_empty() {
                query.push(' ');
            }
            query.push_str(part);
        }
    }
    query
}
