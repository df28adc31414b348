//! Operating-mode selection.
//!
//! The mode is recomputed from scratch for every record; nothing carries over
//! from the previous hour.

use super::SimulationParams;
use crate::models::SystemStatus;

// ---

/// Inputs to the mode decision for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInputs {
    // ---
    pub thermal_delta_c: f64,
    pub occupied: bool,
    pub co2_ppm: f64,
}

/// Pick the operating mode.
///
/// An empty zone is switched off. When occupied, the thermal delta selects
/// cooling, heating, idle or fan-only. High CO₂ then forces ventilation on any
/// comfort-neutral result.
pub fn decide(inputs: ControlInputs, params: &SimulationParams) -> SystemStatus {
    // ---
    let comfort = if !inputs.occupied {
        SystemStatus::Off
    } else if inputs.thermal_delta_c > params.delta_hi_c {
        SystemStatus::Cooling
    } else if inputs.thermal_delta_c < -params.delta_hi_c {
        SystemStatus::Heating
    } else if inputs.thermal_delta_c.abs() < params.delta_lo_c {
        SystemStatus::Idle
    } else {
        SystemStatus::FanOnly
    };

    match comfort {
        SystemStatus::Idle | SystemStatus::Off if inputs.co2_ppm > params.co2_ventilation_ppm => {
            SystemStatus::FanOnly
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn occupied(delta: f64, co2: f64) -> ControlInputs {
        ControlInputs {
            thermal_delta_c: delta,
            occupied: true,
            co2_ppm: co2,
        }
    }

    #[test]
    fn test_occupied_transitions() {
        // ---
        let params = SimulationParams::default();

        assert_eq!(decide(occupied(3.0, 650.0), &params), SystemStatus::Cooling);
        assert_eq!(decide(occupied(-3.0, 650.0), &params), SystemStatus::Heating);
        assert_eq!(decide(occupied(0.4, 650.0), &params), SystemStatus::Idle);
        assert_eq!(decide(occupied(-0.9, 650.0), &params), SystemStatus::Idle);
        assert_eq!(decide(occupied(1.5, 650.0), &params), SystemStatus::FanOnly);
        assert_eq!(decide(occupied(-1.5, 650.0), &params), SystemStatus::FanOnly);
    }

    #[test]
    fn test_threshold_edges() {
        // ---
        let params = SimulationParams::default();

        // Exactly on a threshold falls into the band below it.
        assert_eq!(decide(occupied(2.0, 650.0), &params), SystemStatus::FanOnly);
        assert_eq!(decide(occupied(-2.0, 650.0), &params), SystemStatus::FanOnly);
        assert_eq!(decide(occupied(1.0, 650.0), &params), SystemStatus::FanOnly);
    }

    #[test]
    fn test_unoccupied_is_off() {
        // ---
        let params = SimulationParams::default();
        for delta in [-8.0, -1.5, 0.0, 1.5, 8.0] {
            let inputs = ControlInputs {
                thermal_delta_c: delta,
                occupied: false,
                co2_ppm: 470.0,
            };
            assert_eq!(decide(inputs, &params), SystemStatus::Off);
        }
    }

    #[test]
    fn test_high_co2_forces_ventilation() {
        // ---
        let params = SimulationParams::default();

        assert_eq!(decide(occupied(0.2, 850.0), &params), SystemStatus::FanOnly);

        let stale_empty_room = ControlInputs {
            thermal_delta_c: 0.0,
            occupied: false,
            co2_ppm: 900.0,
        };
        assert_eq!(decide(stale_empty_room, &params), SystemStatus::FanOnly);

        // Active conditioning is not overridden.
        assert_eq!(decide(occupied(5.0, 890.0), &params), SystemStatus::Cooling);
        assert_eq!(decide(occupied(-5.0, 890.0), &params), SystemStatus::Heating);
    }
}
