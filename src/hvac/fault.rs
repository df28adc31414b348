//! Rule-based fault derivation.
//!
//! Rules run in a fixed order and the last one that applies wins, so duct
//! over-pressure always ends up on top.

use rand::Rng;

use super::{AssetState, SimulationParams};
use crate::models::{FaultCode, SystemStatus};

// ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultInputs {
    // ---
    pub status: SystemStatus,
    pub asset: AssetState,
    pub duct_static_pressure_pa: f64,
}

/// Duct static pressure in Pa; a loaded filter pushes it up.
pub fn duct_static_pressure<R: Rng>(
    status: SystemStatus,
    filter_clog_level: f64,
    params: &SimulationParams,
    rng: &mut R,
) -> f64 {
    // ---
    let base = match status {
        SystemStatus::FanOnly => {
            params.duct_fan_base_pa + rng.gen::<f64>() * params.duct_fan_spread_pa
        }
        _ => params.duct_base_pa + rng.gen::<f64>() * params.duct_spread_pa,
    };
    base + filter_clog_level * params.duct_clog_gain_pa
}

pub fn evaluate<R: Rng>(inputs: &FaultInputs, params: &SimulationParams, rng: &mut R) -> FaultCode {
    // ---
    let failure_odds = 1.0 - inputs.asset.equipment_health;
    let mut code = FaultCode::Ok;

    match inputs.status {
        SystemStatus::Cooling if rng.gen::<f64>() < failure_odds => {
            code = FaultCode::HighPressure;
        }
        SystemStatus::Heating if rng.gen::<f64>() < failure_odds => {
            code = FaultCode::HeatingFailure;
        }
        _ => {}
    }

    if inputs.asset.filter_clog_level > params.clog_alarm_threshold
        && rng.gen::<f64>() < params.clog_alarm_probability
    {
        code = FaultCode::DirtyFilter;
    }

    if inputs.duct_static_pressure_pa > params.duct_ceiling_pa {
        code = FaultCode::DuctOverpressure;
    }

    code
}
