//! Contextual suggestion — "what should I look for right now?".
//!
//! Combines current weather (Open-Meteo, no API key) with the local hour
//! and weekday to pick a canned suggestion plus the search prompt it maps
//! to. The rule table is pure so it can be tested without the provider;
//! any weather failure degrades to the generic fallback suggestion.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Local, Timelike, Weekday};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::place::LatLng;
use crate::state::AppState;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// WMO weather codes for clear-to-partly-cloudy conditions.
const CLEAR_CODES: [i32; 3] = [0, 1, 2];
/// WMO weather codes for drizzle, rain, and showers.
const RAIN_CODES: [i32; 9] = [51, 53, 55, 61, 63, 65, 80, 81, 82];

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurrentWeather {
    pub temperature_2m: f64,
    pub weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// One-shot current-conditions lookup for a position.
    pub async fn current(&self, position: LatLng) -> Result<CurrentWeather, reqwest::Error> {
        let response: ForecastResponse = self
            .client
            .get(OPEN_METEO_URL)
            .query(&[
                ("latitude", position.lat.to_string()),
                ("longitude", position.lng.to_string()),
                ("current", "temperature_2m,weathercode".to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;
        Ok(response.current)
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: &'static str,
    pub prompt: &'static str,
}

const FALLBACK: Suggestion = Suggestion {
    message: "Discover the best places around you!",
    prompt: "places to visit nearby",
};

/// The suggestion rule table. Clear weather wins during the day, rain
/// redirects indoors, then weekend and evening rules, then the fallback.
/// The cascade order matches what users actually see: a clear evening
/// falls through to the evening rule, not the sunny one.
pub fn suggestion_for(
    weather: Option<CurrentWeather>,
    hour: u32,
    weekday: Weekday,
) -> Suggestion {
    let Some(weather) = weather else {
        return FALLBACK;
    };

    if CLEAR_CODES.contains(&weather.weathercode) {
        if (10..18).contains(&hour) {
            return Suggestion {
                message: "It's sunny out! Check out the parks and terraces nearby.",
                prompt: "parks or terraces nearby",
            };
        }
        if hour < 10 {
            return Suggestion {
                message: "Sunny morning! Start the day with a good coffee.",
                prompt: "coffee shops nearby",
            };
        }
    }

    if RAIN_CODES.contains(&weather.weathercode) {
        return Suggestion {
            message: "Raining outside? Discover cafes, museums, and other indoor spots!",
            prompt: "cafes or museums nearby",
        };
    }

    if weekday == Weekday::Sat || weekday == Weekday::Sun {
        return Suggestion {
            message: "It's the weekend! See what events and special places are on today.",
            prompt: "weekend events or special places",
        };
    }

    if hour >= 18 {
        return Suggestion {
            message: "Relaxed evening? Try a cozy restaurant or bar!",
            prompt: "restaurants or bars nearby",
        };
    }

    FALLBACK
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// GET /api/v1/suggest
///
/// Without coordinates (or when the weather provider fails) the generic
/// fallback suggestion is returned; there is no error path for the caller.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Suggestion> {
    let weather = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => state
            .weather
            .current(LatLng { lat, lng })
            .await
            .map_err(|e| warn!("Weather lookup failed: {e}"))
            .ok(),
        _ => None,
    };

    if let Some(w) = weather {
        debug!(
            "Current conditions: {:.1}C, code {}",
            w.temperature_2m, w.weathercode
        );
    }

    let now = Local::now();
    Json(suggestion_for(weather, now.hour(), now.weekday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(code: i32) -> Option<CurrentWeather> {
        Some(CurrentWeather {
            temperature_2m: 20.0,
            weathercode: code,
        })
    }

    #[test]
    fn test_no_weather_is_fallback() {
        assert_eq!(suggestion_for(None, 12, Weekday::Mon), FALLBACK);
    }

    #[test]
    fn test_sunny_daytime_suggests_parks() {
        let s = suggestion_for(weather(0), 14, Weekday::Tue);
        assert_eq!(s.prompt, "parks or terraces nearby");
    }

    #[test]
    fn test_sunny_morning_suggests_coffee() {
        let s = suggestion_for(weather(1), 8, Weekday::Wed);
        assert_eq!(s.prompt, "coffee shops nearby");
    }

    #[test]
    fn test_clear_evening_falls_through_to_evening_rule() {
        let s = suggestion_for(weather(0), 20, Weekday::Thu);
        assert_eq!(s.prompt, "restaurants or bars nearby");
    }

    #[test]
    fn test_rain_suggests_indoor_spots() {
        for code in RAIN_CODES {
            let s = suggestion_for(weather(code), 14, Weekday::Tue);
            assert_eq!(s.prompt, "cafes or museums nearby");
        }
    }

    #[test]
    fn test_cloudy_weekend_suggests_events() {
        // code 3 (overcast) is neither clear nor rain
        let s = suggestion_for(weather(3), 12, Weekday::Sat);
        assert_eq!(s.prompt, "weekend events or special places");
    }

    #[test]
    fn test_cloudy_weekday_midday_is_fallback() {
        let s = suggestion_for(weather(3), 12, Weekday::Mon);
        assert_eq!(s, FALLBACK);
    }

    #[test]
    fn test_forecast_payload_deserializes() {
        let payload = r#"{"current": {"temperature_2m": 21.4, "weathercode": 61}}"#;
        let parsed: ForecastResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.current.weathercode, 61);
    }
}
