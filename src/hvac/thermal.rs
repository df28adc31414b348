//! Free-running zone temperature and thermostat set-point.

use rand::Rng;

use super::SimulationParams;

// ---

/// Output of the thermal step for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalReading {
    // ---
    /// Indoor temperature the zone would reach without conditioning.
    pub uncontrolled_temp_c: f64,
    pub set_point_c: f64,
}

impl ThermalReading {
    /// Positive when the zone is warmer than the thermostat wants.
    pub fn thermal_delta(&self) -> f64 {
        self.uncontrolled_temp_c - self.set_point_c
    }
}

/// Lag the indoor temperature behind the outdoor one through the building's
/// inertia factor, then draw the thermostat set-point around the base.
pub fn evaluate<R: Rng>(outdoor_temp_c: f64, params: &SimulationParams, rng: &mut R) -> ThermalReading {
    // ---
    let base = params.base_indoor_temp_c;
    let jitter = (rng.gen::<f64>() - 0.5) * params.indoor_jitter_c;
    let uncontrolled_temp_c = base + (outdoor_temp_c - base) * params.inertia_factor + jitter;
    let set_point_c = base + (rng.gen::<f64>() - 0.5) * params.set_point_spread_c;

    ThermalReading {
        uncontrolled_temp_c,
        set_point_c,
    }
}
