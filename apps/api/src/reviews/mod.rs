//! Review summarization — fetches a venue's public reviews and condenses
//! them into a strengths/drawbacks summary via the LLM.

pub mod prompts;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::reviews::prompts::{build_review_summary_prompt, REVIEW_SUMMARY_SYSTEM};
use crate::state::AppState;

/// Returned when the venue has no usable reviews. A 200 outcome, not an
/// error.
pub const NO_REVIEWS_SUMMARY: &str = "There are not enough reviews for this place yet.";

#[derive(Debug, Deserialize)]
pub struct ReviewSummaryRequest {
    pub place_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewSummaryResponse {
    pub summary: String,
}

/// POST /api/v1/reviews/summary
pub async fn handle_review_summary(
    State(state): State<AppState>,
    Json(req): Json<ReviewSummaryRequest>,
) -> Result<Json<ReviewSummaryResponse>, AppError> {
    let place_id = req.place_id.trim();
    if place_id.is_empty() {
        return Err(AppError::Validation("place_id is required".to_string()));
    }

    let reviews = state
        .places
        .fetch_reviews(place_id)
        .await
        .map_err(|e| AppError::Places(e.to_string()))?;

    if reviews.is_empty() {
        return Ok(Json(ReviewSummaryResponse {
            summary: NO_REVIEWS_SUMMARY.to_string(),
        }));
    }

    let prompt = build_review_summary_prompt(&reviews);
    let response = state
        .llm
        .call(&prompt, REVIEW_SUMMARY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to summarize reviews: {e}")))?;

    let summary = response
        .text()
        .ok_or_else(|| AppError::Llm("LLM returned an empty review summary".to_string()))?
        .to_string();

    Ok(Json(ReviewSummaryResponse { summary }))
}
