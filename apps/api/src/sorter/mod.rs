//! Result sorting — orders and filters one search-result view by rating,
//! price tier, or distance from the viewer.
//!
//! `apply_sort` is pure and synchronous: it never mutates its inputs and
//! returns a fresh list, so the caller keeps the provider's original order
//! for the "no sort" case. Re-running it with the same inputs yields the
//! same output, which the HTTP layer relies on across repeated requests.

use serde::Deserialize;
use thiserror::Error;

use crate::models::place::{LatLng, PlaceRecord};

/// Mean Earth radius used by the haversine approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default cutoff for distance sorting. Overridable via `DISTANCE_LIMIT_KM`.
pub const DEFAULT_DISTANCE_LIMIT_KM: f64 = 30.0;

/// User-selected ordering. "No sort" is `None` at the call boundary:
/// the provider's original order is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    RatingDesc,
    PriceAsc,
    PriceDesc,
    DistanceAsc,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    /// Distance sorting was requested but no viewer position was supplied.
    /// Distinct from an empty result: the caller must surface it, not fall
    /// back to unsorted output.
    #[error("viewer position unavailable for distance sorting")]
    PositionUnavailable,
}

/// Produces an ordered, possibly shorter view of `records`.
///
/// Records lacking the field the criterion needs are dropped, not sorted to
/// the end. All sorts are stable: equal keys keep their input order, so the
/// displayed list does not shuffle between identical invocations.
pub fn apply_sort(
    records: &[PlaceRecord],
    criterion: Option<SortCriterion>,
    viewer: Option<LatLng>,
    max_distance_km: f64,
) -> Result<Vec<PlaceRecord>, SortError> {
    let Some(criterion) = criterion else {
        return Ok(records.to_vec());
    };

    match criterion {
        SortCriterion::RatingDesc => {
            let mut kept: Vec<(f64, PlaceRecord)> = records
                .iter()
                .filter_map(|r| r.rating.map(|rating| (rating, r.clone())))
                .collect();
            kept.sort_by(|a, b| b.0.total_cmp(&a.0));
            Ok(kept.into_iter().map(|(_, r)| r).collect())
        }
        SortCriterion::PriceAsc | SortCriterion::PriceDesc => {
            let mut kept: Vec<(u8, PlaceRecord)> = records
                .iter()
                .filter_map(|r| r.price_level.map(|price| (price, r.clone())))
                .collect();
            match criterion {
                SortCriterion::PriceAsc => kept.sort_by_key(|(price, _)| *price),
                _ => kept.sort_by(|a, b| b.0.cmp(&a.0)),
            }
            Ok(kept.into_iter().map(|(_, r)| r).collect())
        }
        SortCriterion::DistanceAsc => {
            let viewer = viewer.ok_or(SortError::PositionUnavailable)?;
            let mut kept: Vec<(f64, PlaceRecord)> = records
                .iter()
                .filter_map(|r| {
                    r.coordinates
                        .map(|coords| (haversine_km(viewer, coords), r.clone()))
                })
                .filter(|(distance, _)| *distance <= max_distance_km)
                .collect();
            kept.sort_by(|a, b| a.0.total_cmp(&b.0));
            Ok(kept.into_iter().map(|(_, r)| r).collect())
        }
    }
}

/// Great-circle distance between two points in kilometers, spherical-earth
/// haversine. No ellipsoidal correction.
pub fn haversine_km(from: LatLng, to: LatLng) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> PlaceRecord {
        PlaceRecord {
            place_id: id.to_string(),
            name: id.to_string(),
            address: None,
            rating: None,
            price_level: None,
            types: Vec::new(),
            user_ratings_total: None,
            coordinates: None,
            photo_reference: None,
            website: None,
            google_maps_url: String::new(),
        }
    }

    fn rated(id: &str, rating: f64) -> PlaceRecord {
        PlaceRecord {
            rating: Some(rating),
            ..place(id)
        }
    }

    fn priced(id: &str, price: u8) -> PlaceRecord {
        PlaceRecord {
            price_level: Some(price),
            ..place(id)
        }
    }

    fn at(id: &str, lat: f64, lng: f64) -> PlaceRecord {
        PlaceRecord {
            coordinates: Some(LatLng { lat, lng }),
            ..place(id)
        }
    }

    fn ids(records: &[PlaceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.place_id.as_str()).collect()
    }

    const VIEWER: LatLng = LatLng {
        lat: 45.7489,
        lng: 21.2087,
    };

    /// Offsets the viewer northward by roughly `km` kilometers.
    fn north_of_viewer(id: &str, km: f64) -> PlaceRecord {
        at(id, VIEWER.lat + km / 111.0, VIEWER.lng)
    }

    #[test]
    fn test_no_sort_passthrough() {
        let records = vec![rated("b", 1.0), rated("a", 5.0), place("c")];
        let out = apply_sort(&records, None, None, DEFAULT_DISTANCE_LIMIT_KM).unwrap();
        assert_eq!(ids(&out), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rating_desc_drops_unrated_and_is_stable() {
        // ratings [3.5, 4.8, undefined, 4.8] -> [4.8 (idx 1), 4.8 (idx 3), 3.5]
        let records = vec![
            rated("r0", 3.5),
            rated("r1", 4.8),
            place("r2"),
            rated("r3", 4.8),
        ];
        let out = apply_sort(
            &records,
            Some(SortCriterion::RatingDesc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["r1", "r3", "r0"]);
    }

    #[test]
    fn test_price_asc_is_monotonic_and_stable() {
        // price tiers [2, 0, 4, 2] -> [0, 2 (idx 0), 2 (idx 3), 4]
        let records = vec![priced("p0", 2), priced("p1", 0), priced("p2", 4), priced("p3", 2)];
        let out = apply_sort(
            &records,
            Some(SortCriterion::PriceAsc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["p1", "p0", "p3", "p2"]);
        let tiers: Vec<u8> = out.iter().map(|r| r.price_level.unwrap()).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_price_desc_drops_unpriced() {
        let records = vec![priced("p0", 1), place("p1"), priced("p2", 3)];
        let out = apply_sort(
            &records,
            Some(SortCriterion::PriceDesc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["p2", "p0"]);
    }

    #[test]
    fn test_distance_orders_and_cuts_at_limit() {
        // 2 km, 10 km, 40 km -> [2 km, 10 km]; 40 km excluded
        let records = vec![
            north_of_viewer("d10", 10.0),
            north_of_viewer("d2", 2.0),
            north_of_viewer("d40", 40.0),
        ];
        let out = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            Some(VIEWER),
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["d2", "d10"]);
    }

    #[test]
    fn test_distance_drops_records_without_coordinates() {
        // a record without coordinates is excluded, never ranked as closest
        let records = vec![place("no-coords"), north_of_viewer("near", 1.0)];
        let out = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            Some(VIEWER),
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["near"]);
    }

    #[test]
    fn test_distance_without_position_is_a_distinct_error() {
        let records = vec![north_of_viewer("near", 1.0)];
        let err = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap_err();
        assert_eq!(err, SortError::PositionUnavailable);
    }

    #[test]
    fn test_distance_respects_configured_limit() {
        let records = vec![north_of_viewer("d20", 20.0), north_of_viewer("d28", 28.0)];
        let out = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            Some(VIEWER),
            25.0,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["d20"]);
    }

    #[test]
    fn test_distance_is_monotonic() {
        let records = vec![
            north_of_viewer("d7", 7.0),
            north_of_viewer("d1", 1.0),
            north_of_viewer("d12", 12.0),
            north_of_viewer("d3", 3.0),
        ];
        let out = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            Some(VIEWER),
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        let distances: Vec<f64> = out
            .iter()
            .map(|r| haversine_km(VIEWER, r.coordinates.unwrap()))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_input_is_empty_output_for_every_criterion() {
        for criterion in [
            None,
            Some(SortCriterion::RatingDesc),
            Some(SortCriterion::PriceAsc),
            Some(SortCriterion::PriceDesc),
            Some(SortCriterion::DistanceAsc),
        ] {
            let out = apply_sort(&[], criterion, Some(VIEWER), DEFAULT_DISTANCE_LIMIT_KM).unwrap();
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_filtering_everything_is_valid_not_an_error() {
        let records = vec![north_of_viewer("far1", 50.0), north_of_viewer("far2", 60.0)];
        let out = apply_sort(
            &records,
            Some(SortCriterion::DistanceAsc),
            Some(VIEWER),
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let records = vec![
            rated("a", 4.1),
            rated("b", 4.1),
            rated("c", 2.0),
            place("d"),
        ];
        let first = apply_sort(
            &records,
            Some(SortCriterion::RatingDesc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        let second = apply_sort(
            &records,
            Some(SortCriterion::RatingDesc),
            None,
            DEFAULT_DISTANCE_LIMIT_KM,
        )
        .unwrap();
        assert_eq!(ids(&first), ids(&second));
        // input untouched
        assert_eq!(ids(&records), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let records = vec![rated("a", 1.0), place("b")];
        for criterion in [
            Some(SortCriterion::RatingDesc),
            Some(SortCriterion::PriceAsc),
            Some(SortCriterion::PriceDesc),
            Some(SortCriterion::DistanceAsc),
        ] {
            let out =
                apply_sort(&records, criterion, Some(VIEWER), DEFAULT_DISTANCE_LIMIT_KM).unwrap();
            assert!(out.len() <= records.len());
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Timisoara -> Arad is ~49 km great-circle
        let timisoara = LatLng {
            lat: 45.7489,
            lng: 21.2087,
        };
        let arad = LatLng {
            lat: 46.1866,
            lng: 21.3123,
        };
        let d = haversine_km(timisoara, arad);
        assert!((d - 49.3).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert!(haversine_km(VIEWER, VIEWER).abs() < 1e-9);
    }
}
