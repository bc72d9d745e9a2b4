//! Great-circle distance and landmark pairing for impossible-travel logins.

use crate::simulation::pools::{LANDMARKS, Landmark};
use crate::simulation::types::Geo;
use rand::Rng;
use rand::seq::IndexedRandom;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Pairs whose distance is within this much of the best match are all
/// eligible, so repeated runs don't always pick the same two cities.
pub const PAIR_TOLERANCE_KM: f64 = 500.0;

/// Haversine distance in kilometres.
pub fn distance_km(a: Geo, b: Geo) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Two distinct landmarks whose separation best approximates `target_km`.
///
/// Orientation (which one is "home") is random.
pub fn pick_landmark_pair<R: Rng + ?Sized>(
    target_km: f64,
    rng: &mut R,
) -> (Landmark, Landmark, f64) {
    let mut pairs = Vec::with_capacity(LANDMARKS.len() * LANDMARKS.len() / 2);
    for (i, a) in LANDMARKS.iter().enumerate() {
        for b in &LANDMARKS[i + 1..] {
            pairs.push((*a, *b, distance_km(a.geo, b.geo)));
        }
    }

    let best_gap = pairs
        .iter()
        .map(|(_, _, d)| (d - target_km).abs())
        .fold(f64::INFINITY, f64::min);

    let candidates: Vec<_> = pairs
        .into_iter()
        .filter(|(_, _, d)| (d - target_km).abs() <= best_gap + PAIR_TOLERANCE_KM)
        .collect();

    // LANDMARKS has more than one entry, so there is always a best pair.
    let (a, b, d) = candidates
        .choose(rng)
        .copied()
        .unwrap_or((LANDMARKS[0], LANDMARKS[1], distance_km(LANDMARKS[0].geo, LANDMARKS[1].geo)));

    if rng.random_bool(0.5) { (a, b, d) } else { (b, a, d) }
}
