use serde::{Deserialize, Serialize};

/// Canonical coordinate pair in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One venue, normalized into the single shape every downstream consumer
/// (sorter, handlers, favorites) operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    #[serde(default)]
    pub types: Vec<String>,
    pub user_ratings_total: Option<u32>,
    pub coordinates: Option<LatLng>,
    pub photo_reference: Option<String>,
    pub website: Option<String>,
    pub google_maps_url: String,
}

/// Coordinate object as it appears nested in provider payloads.
/// Accepts both `lat`/`lng` and `latitude`/`longitude` naming.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawCoords {
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub location: Option<RawCoords>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPhoto {
    pub photo_reference: Option<String>,
}

/// A venue exactly as the search provider sent it, before normalization.
///
/// Coordinates may arrive in any of four places: top-level `lat`/`lng`,
/// top-level `latitude`/`longitude`, nested under `location`, or under
/// `geometry.location` (the Google Text Search payload). Normalization to
/// the canonical `LatLng` happens once, here, at ingestion; downstream code
/// never sees the raw shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    #[serde(default, alias = "address")]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub location: Option<RawCoords>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
}

impl RawPlace {
    /// Picks the first recognizable coordinate shape. An unrecognized or
    /// absent shape yields `None`; it is never treated as `(0, 0)`.
    fn canonical_coordinates(&self) -> Option<LatLng> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            return Some(LatLng { lat, lng });
        }
        if let Some(loc) = self.location {
            if let (Some(lat), Some(lng)) = (loc.lat, loc.lng) {
                return Some(LatLng { lat, lng });
            }
        }
        if let Some(loc) = self.geometry.as_ref().and_then(|g| g.location) {
            if let (Some(lat), Some(lng)) = (loc.lat, loc.lng) {
                return Some(LatLng { lat, lng });
            }
        }
        None
    }

    /// Normalizes into the canonical record. `website` and `maps_url` come
    /// from the per-place Details lookup; a missing Maps URL falls back to
    /// the place_id deep link.
    pub fn into_record(self, website: Option<String>, maps_url: Option<String>) -> PlaceRecord {
        let coordinates = self.canonical_coordinates();
        let google_maps_url = maps_url.unwrap_or_else(|| {
            format!(
                "https://www.google.com/maps/place/?q=place_id:{}",
                self.place_id
            )
        });
        PlaceRecord {
            place_id: self.place_id,
            name: self.name,
            address: self.formatted_address,
            rating: self.rating,
            price_level: self.price_level,
            types: self.types,
            user_ratings_total: self.user_ratings_total,
            coordinates,
            photo_reference: self.photos.into_iter().find_map(|p| p.photo_reference),
            website,
            google_maps_url,
        }
    }
}
