//! Favorites and search history — per-user CRUD over the two Postgres
//! tables the account screen reads. Authentication is out of scope; the
//! caller supplies `user_id` explicitly.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::favorite::{FavoriteRow, SearchHistoryRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateFavoriteRequest {
    pub user_id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub photo_reference: Option<String>,
    pub google_maps_url: Option<String>,
    pub website: Option<String>,
}

/// POST /api/v1/favorites
pub async fn handle_create_favorite(
    State(state): State<AppState>,
    Json(req): Json<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteRow>), AppError> {
    if req.place_id.trim().is_empty() || req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "place_id and name are required".to_string(),
        ));
    }

    let row: FavoriteRow = sqlx::query_as(
        r#"
        INSERT INTO favorites
            (user_id, place_id, name, address, photo_reference, google_maps_url, website)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(req.user_id)
    .bind(&req.place_id)
    .bind(&req.name)
    .bind(&req.address)
    .bind(&req.photo_reference)
    .bind(&req.google_maps_url)
    .bind(&req.website)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<FavoriteRow>>, AppError> {
    let rows: Vec<FavoriteRow> = sqlx::query_as(
        "SELECT * FROM favorites WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// DELETE /api/v1/favorites/:id
pub async fn handle_delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM favorites WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Favorite {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SearchHistoryRow>>, AppError> {
    let rows: Vec<SearchHistoryRow> = sqlx::query_as(
        "SELECT * FROM search_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM search_history WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("History entry {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Records a search prompt into the user's history. Insert failure is
/// logged and swallowed; it must never fail the search that triggered it.
pub async fn record_search(pool: &sqlx::PgPool, user_id: Uuid, query: &str) {
    if let Err(e) = sqlx::query("INSERT INTO search_history (user_id, query) VALUES ($1, $2)")
        .bind(user_id)
        .bind(query)
        .execute(pool)
        .await
    {
        error!("Failed to record search history for {user_id}: {e}");
    }
}
