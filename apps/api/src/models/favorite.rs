use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved venue, one row per (user, place) save action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub photo_reference: Option<String>,
    pub google_maps_url: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One past search prompt, recorded at search time for logged-in users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub query: String,
    pub created_at: DateTime<Utc>,
}
