//! Wear and maintenance of the modeled unit.
//!
//! The unit drifts a little every hour: compressor health goes down and the
//! filter loads up. Whenever a record falls in the maintenance month the unit is
//! serviced, which restores health and swaps the filter.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

use super::SimulationParams;

// ---

/// Condition of the HVAC unit, threaded through the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetState {
    // ---
    /// 1.0 is pristine; never below the configured floor.
    pub equipment_health: f64,
    /// 0.0 is a clean filter, 1.0 fully clogged.
    pub filter_clog_level: f64,
}

impl Default for AssetState {
    fn default() -> Self {
        Self::pristine()
    }
}

impl AssetState {
    // ---
    pub fn pristine() -> Self {
        Self {
            equipment_health: 1.0,
            filter_clog_level: 0.0,
        }
    }

    /// Build a state from arbitrary values, clamped into range.
    pub fn new(equipment_health: f64, filter_clog_level: f64) -> Self {
        // ---
        let mut state = Self {
            equipment_health,
            filter_clog_level,
        };
        state.clamp(0.0);
        state
    }

    /// Advance one record at `timestamp`.
    ///
    /// Returns `true` when the record fell in the maintenance month and the unit
    /// was serviced.
    pub fn advance<R: Rng>(
        &mut self,
        timestamp: DateTime<Utc>,
        params: &SimulationParams,
        rng: &mut R,
    ) -> bool {
        // ---
        self.equipment_health -= rng.gen::<f64>() * params.health_drift_max;
        self.filter_clog_level += rng.gen::<f64>() * params.clog_drift_max;

        let serviced = timestamp.month() == params.maintenance_month.number_from_month();
        if serviced {
            self.filter_clog_level = rng.gen::<f64>() * params.serviced_clog_max;
            self.equipment_health = params.serviced_health_min
                + rng.gen::<f64>() * (1.0 - params.serviced_health_min);
        }

        self.clamp(params.health_floor);
        serviced
    }

    fn clamp(&mut self, health_floor: f64) {
        // NaN inputs collapse to the pristine end.
        if self.equipment_health.is_nan() {
            self.equipment_health = 1.0;
        }
        if self.filter_clog_level.is_nan() {
            self.filter_clog_level = 0.0;
        }
        self.equipment_health = self.equipment_health.clamp(health_floor, 1.0);
        self.filter_clog_level = self.filter_clog_level.clamp(0.0, 1.0);
    }
}
