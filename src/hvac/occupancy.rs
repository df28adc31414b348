//! Occupancy and the CO₂ proxy that follows it.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use rand::Rng;

use super::SimulationParams;

// ---

/// Probability that the zone is occupied at `timestamp`, always within [0, 1].
///
/// Weekday business hours are busy apart from a quieter lunch window; nights and
/// weekends see only the odd visitor.
pub fn probability(timestamp: DateTime<Utc>, params: &SimulationParams) -> f64 {
    // ---
    let weekday = !matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun);
    let hour = timestamp.hour();

    let configured = match (weekday, hour) {
        (true, 12..=13) => params.lunch_occupancy,
        (true, 8..=17) => params.business_occupancy,
        _ => params.off_hours_occupancy,
    };

    // NaN counts as never occupied.
    if configured.is_nan() {
        0.0
    } else {
        configured.clamp(0.0, 1.0)
    }
}

/// Bernoulli draw against [`probability`].
pub fn sample<R: Rng>(timestamp: DateTime<Utc>, params: &SimulationParams, rng: &mut R) -> bool {
    rng.gen_bool(probability(timestamp, params))
}

/// CO₂ concentration in ppm; people push it up.
pub fn co2_level<R: Rng>(occupied: bool, params: &SimulationParams, rng: &mut R) -> f64 {
    // ---
    if occupied {
        params.co2_occupied_base_ppm + rng.gen::<f64>() * params.co2_occupied_spread_ppm
    } else {
        params.co2_vacant_base_ppm + rng.gen::<f64>() * params.co2_vacant_spread_ppm
    }
}
