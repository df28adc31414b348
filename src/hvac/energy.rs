//! Energy draw and the refrigerant-side readings of the unit.
//!
//! Cooling is the expensive mode: it pays for the temperature lift, for latent
//! heat once the outdoor air gets humid, and for a worn compressor or a loaded
//! filter. Heating follows the same shape with smaller coefficients and no
//! humidity term.

use rand::Rng;

use super::{AssetState, SimulationParams};
use crate::models::SystemStatus;

// ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyInputs {
    // ---
    pub status: SystemStatus,
    pub outdoor_temp_c: f64,
    pub outdoor_humidity_pct: f64,
    pub set_point_c: f64,
    pub asset: AssetState,
}

/// Supply-air and refrigerant readings for the chosen mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirSide {
    // ---
    pub supply_air_temp_c: f64,
    pub refrigerant_pressure_psi: f64,
}

/// Extra cooling load for dehumidification, zero up to the humidity threshold
/// and linear above it.
pub fn humidity_penalty(humidity_pct: f64, params: &SimulationParams) -> f64 {
    (humidity_pct - params.humidity_threshold_pct).max(0.0) * params.humidity_penalty_per_pct
}

/// Multiplier applied to active conditioning for a worn or clogged unit.
pub fn inefficiency(asset: &AssetState, params: &SimulationParams) -> f64 {
    1.0 + (1.0 - asset.equipment_health) * params.health_inefficiency
        + asset.filter_clog_level * params.clog_inefficiency
}

/// Instantaneous draw in kWh for one hourly record.
pub fn power_draw<R: Rng>(inputs: &EnergyInputs, params: &SimulationParams, rng: &mut R) -> f64 {
    // ---
    let raw = match inputs.status {
        SystemStatus::Cooling => {
            let lift = (inputs.outdoor_temp_c - inputs.set_point_c).max(0.0);
            (params.cooling_base_kwh
                + lift * params.cooling_gain_per_c
                + humidity_penalty(inputs.outdoor_humidity_pct, params))
                * inefficiency(&inputs.asset, params)
        }
        SystemStatus::Heating => {
            let lift = (inputs.set_point_c - inputs.outdoor_temp_c).max(0.0);
            (params.heating_base_kwh + lift * params.heating_gain_per_c)
                * inefficiency(&inputs.asset, params)
        }
        SystemStatus::FanOnly => params.fan_base_kwh + rng.gen::<f64>() * params.fan_spread_kwh,
        SystemStatus::Idle => params.idle_kwh,
        SystemStatus::Off => params.off_kwh,
    };

    let jitter = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * params.power_jitter;
    (raw * jitter).max(params.power_floor_kwh)
}

/// Supply-air temperature and refrigerant pressure given the return air.
pub fn air_side<R: Rng>(
    status: SystemStatus,
    return_temp_c: f64,
    params: &SimulationParams,
    rng: &mut R,
) -> AirSide {
    // ---
    let p = params;
    match status {
        SystemStatus::Cooling => AirSide {
            supply_air_temp_c: return_temp_c
                - (p.cooling_supply_drop_c + rng.gen::<f64>() * p.cooling_supply_spread_c),
            refrigerant_pressure_psi: p.cooling_refrigerant_psi
                + rng.gen::<f64>() * p.cooling_refrigerant_spread_psi,
        },
        SystemStatus::Heating => AirSide {
            supply_air_temp_c: return_temp_c
                + (p.heating_supply_rise_c + rng.gen::<f64>() * p.heating_supply_spread_c),
            refrigerant_pressure_psi: p.heating_refrigerant_psi
                + rng.gen::<f64>() * p.heating_refrigerant_spread_psi,
        },
        _ => AirSide {
            supply_air_temp_c: return_temp_c,
            refrigerant_pressure_psi: p.standby_refrigerant_psi
                + rng.gen::<f64>() * p.standby_refrigerant_spread_psi,
        },
    }
}
