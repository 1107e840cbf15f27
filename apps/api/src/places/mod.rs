//! Places Client — the single point of entry for all Google Places calls.
//!
//! Wraps Text Search (candidate venues) and Details (website, Maps URL,
//! reviews). Every venue leaves this module already normalized into the
//! canonical `PlaceRecord` shape; raw provider payloads do not escape.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::place::{LatLng, PlaceRecord, RawPlace};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Default search radius in meters when a location bias is supplied.
const DEFAULT_RADIUS_M: u32 = 3000;
/// Review-summary inputs: at most this many reviews, each truncated.
const MAX_REVIEWS: usize = 5;
const MAX_REVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API status {status}: {message}")]
    Api { status: String, message: String },
}

/// Options for one venue search, mirroring what the search flow can supply.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub query: String,
    pub location: Option<LatLng>,
    pub radius_m: Option<u32>,
    pub min_rating: Option<f64>,
    pub max_price_level: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<DetailsResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    reviews: Vec<RawReview>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Runs a Text Search, enriches each hit with Details (website + Maps
    /// URL), applies the optional rating/price filters, and returns
    /// canonical records.
    pub async fn search(&self, options: &SearchOptions) -> Result<Vec<PlaceRecord>, PlacesError> {
        let mut request = self
            .client
            .get(TEXT_SEARCH_URL)
            .query(&[
                ("query", options.query.as_str()),
                ("key", self.api_key.as_str()),
            ]);

        if let Some(location) = options.location {
            request = request.query(&[
                ("location", format!("{},{}", location.lat, location.lng)),
                (
                    "radius",
                    options.radius_m.unwrap_or(DEFAULT_RADIUS_M).to_string(),
                ),
            ]);
        }

        let response: TextSearchResponse = request.send().await?.json().await?;

        if response.status != "OK" && response.status != "ZERO_RESULTS" {
            return Err(PlacesError::Api {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }

        debug!("Text search returned {} candidates", response.results.len());

        let mut records = Vec::with_capacity(response.results.len());
        for raw in response.results {
            // Details failures degrade per-place: keep the venue, fall back
            // to the place_id deep link.
            let (website, maps_url) = match self.fetch_links(&raw.place_id).await {
                Ok(links) => links,
                Err(e) => {
                    warn!("Details lookup failed for {}: {e}", raw.place_id);
                    (None, None)
                }
            };
            records.push(raw.into_record(website, maps_url));
        }

        Ok(apply_result_filters(
            records,
            options.min_rating,
            options.max_price_level,
        ))
    }

    /// Fetches the website and canonical Maps URL for one place.
    async fn fetch_links(
        &self,
        place_id: &str,
    ) -> Result<(Option<String>, Option<String>), PlacesError> {
        let result = self.fetch_details(place_id, "website,url").await?;
        Ok((result.website, result.url))
    }

    /// Fetches up to five review texts for one place, each truncated to the
    /// length the summarization prompt expects. An empty list is a valid
    /// outcome, not an error.
    pub async fn fetch_reviews(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let result = self.fetch_details(place_id, "reviews").await?;
        Ok(result
            .reviews
            .into_iter()
            .filter_map(|r| r.text)
            .filter(|t| !t.is_empty())
            .take(MAX_REVIEWS)
            .map(|t| truncate_chars(&t, MAX_REVIEW_CHARS))
            .collect())
    }

    async fn fetch_details(
        &self,
        place_id: &str,
        fields: &str,
    ) -> Result<DetailsResult, PlacesError> {
        let response: DetailsResponse = self
            .client
            .get(DETAILS_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", fields),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(PlacesError::Api {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }

        Ok(response.result.unwrap_or_default())
    }
}

/// Optional post-search filters from the original search flow: minimum
/// rating and maximum price level. A venue missing the filtered field is
/// dropped only when that filter is active.
fn apply_result_filters(
    records: Vec<PlaceRecord>,
    min_rating: Option<f64>,
    max_price_level: Option<u8>,
) -> Vec<PlaceRecord> {
    records
        .into_iter()
        .filter(|r| match min_rating {
            Some(min) => r.rating.map(|rating| rating >= min).unwrap_or(false),
            None => true,
        })
        .filter(|r| match max_price_level {
            Some(max) => r.price_level.map(|price| price <= max).unwrap_or(false),
            None => true,
        })
        .collect()
}

/// Truncates on a char boundary; review texts can be arbitrary UTF-8.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
