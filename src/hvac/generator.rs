//! Sequential orchestration of the simulation models.
//!
//! A [`Generator`] owns everything that carries memory across records: the asset
//! condition and the random generator. Records must be fed in ascending time
//! order; the maintenance reset and the drift both depend on it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::control::{self, ControlInputs};
use super::energy::{self, EnergyInputs};
use super::fault::{self, FaultInputs};
use super::{occupancy, thermal, AssetState, SimulationParams};
use crate::models::{ClimateRecord, SensorRecord, SystemStatus};

// ---

/// Static labels stamped on every record of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLabels {
    // ---
    pub asset_model: String,
    pub location_zone: String,
    pub device_prefix: String,
    /// Device ids are drawn from `1..=device_pool`.
    pub device_pool: u32,
}

impl Default for DeviceLabels {
    fn default() -> Self {
        Self {
            asset_model: "HVAC-Model-B".to_string(),
            location_zone: "Zone-A".to_string(),
            device_prefix: "ROOM".to_string(),
            device_pool: 10,
        }
    }
}

/// Forced inputs for what-if runs. `None` fields are simulated as usual.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    // ---
    pub occupied: Option<bool>,
    pub status: Option<SystemStatus>,
}

pub struct Generator {
    params: SimulationParams,
    labels: DeviceLabels,
    asset: AssetState,
    rng: StdRng,
}

impl Generator {
    // ---
    /// Create a generator seeded from `seed`, or from OS entropy when `None`.
    pub fn new(params: SimulationParams, labels: DeviceLabels, seed: Option<u64>) -> Self {
        // ---
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            params,
            labels,
            asset: AssetState::pristine(),
            rng,
        }
    }

    /// Start the run from a given asset condition instead of a pristine unit.
    pub fn with_asset(mut self, asset: AssetState) -> Self {
        self.asset = asset;
        self
    }

    pub fn asset(&self) -> &AssetState {
        &self.asset
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn generate(&mut self, record: &ClimateRecord) -> SensorRecord {
        self.generate_with(record, Overrides::default())
    }

    /// Run the whole sequence, one output per input and in the same order.
    pub fn generate_all(&mut self, records: &[ClimateRecord]) -> Vec<SensorRecord> {
        // ---
        records.iter().map(|record| self.generate(record)).collect()
    }

    /// Advance the asset, then run thermal, control, energy and fault models in
    /// that order for one record.
    pub fn generate_with(&mut self, record: &ClimateRecord, overrides: Overrides) -> SensorRecord {
        // ---
        let params = &self.params;
        let rng = &mut self.rng;

        let before = self.asset;
        if self.asset.advance(record.timestamp, params, rng)
            && before.filter_clog_level > params.serviced_clog_max
        {
            tracing::debug!(
                timestamp = %record.timestamp,
                clog_before = before.filter_clog_level,
                health_before = before.equipment_health,
                "Maintenance visit: filter replaced and unit serviced"
            );
        }
        let asset = self.asset;

        let occupied = match overrides.occupied {
            Some(occupied) => occupied,
            None => occupancy::sample(record.timestamp, params, rng),
        };

        let thermal = thermal::evaluate(record.outdoor_temperature_c, params, rng);
        let co2_level_ppm = occupancy::co2_level(occupied, params, rng);

        let status = overrides.status.unwrap_or_else(|| {
            control::decide(
                ControlInputs {
                    thermal_delta_c: thermal.thermal_delta(),
                    occupied,
                    co2_ppm: co2_level_ppm,
                },
                params,
            )
        });

        let return_air_temperature = thermal.uncontrolled_temp_c;
        let air = energy::air_side(status, return_air_temperature, params, rng);

        let power_consumption_kwh = energy::power_draw(
            &EnergyInputs {
                status,
                outdoor_temp_c: record.outdoor_temperature_c,
                outdoor_humidity_pct: record.outdoor_relative_humidity_pct,
                set_point_c: thermal.set_point_c,
                asset,
            },
            params,
            rng,
        );

        let duct_static_pressure_pa =
            fault::duct_static_pressure(status, asset.filter_clog_level, params, rng);
        let fault_code = fault::evaluate(
            &FaultInputs {
                status,
                asset,
                duct_static_pressure_pa,
            },
            params,
            rng,
        );

        let device_number = rng.gen_range(1..=self.labels.device_pool.max(1));

        SensorRecord {
            timestamp: record.timestamp,
            internal_temperature: thermal.uncontrolled_temp_c,
            set_point_temperature: thermal.set_point_c,
            system_status: status,
            occupancy_status: occupied,
            power_consumption_kwh,
            outdoor_temperature: record.outdoor_temperature_c,
            outdoor_humidity: record.outdoor_relative_humidity_pct,
            device_id: format!("{}-{}", self.labels.device_prefix, device_number),
            supply_air_temperature: air.supply_air_temp_c,
            return_air_temperature,
            duct_static_pressure_pa,
            co2_level_ppm,
            refrigerant_pressure_psi: air.refrigerant_pressure_psi,
            fault_code,
            asset_model: self.labels.asset_model.clone(),
            location_zone: self.labels.location_zone.clone(),
        }
    }
}
