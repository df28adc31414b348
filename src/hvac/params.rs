//! Tunable constants of the simulation.
//!
//! Every threshold, coefficient and sampling range the engine uses is gathered
//! here so a run can be described by one value. `Default` carries the calibrated
//! set. Ranges are written as a base plus a uniform spread.

use chrono::Month;

// ---

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    // ---
    // Asset degradation
    pub maintenance_month: Month,
    pub health_floor: f64,
    pub health_drift_max: f64,
    pub clog_drift_max: f64,
    pub serviced_clog_max: f64,
    pub serviced_health_min: f64,

    // Thermal model
    pub base_indoor_temp_c: f64,
    pub inertia_factor: f64,
    pub indoor_jitter_c: f64,
    pub set_point_spread_c: f64,

    // Control logic
    pub delta_hi_c: f64,
    pub delta_lo_c: f64,
    pub co2_ventilation_ppm: f64,

    // Occupancy and CO₂
    pub business_occupancy: f64,
    pub lunch_occupancy: f64,
    pub off_hours_occupancy: f64,
    pub co2_occupied_base_ppm: f64,
    pub co2_occupied_spread_ppm: f64,
    pub co2_vacant_base_ppm: f64,
    pub co2_vacant_spread_ppm: f64,

    // Energy model
    pub cooling_base_kwh: f64,
    pub cooling_gain_per_c: f64,
    pub humidity_threshold_pct: f64,
    pub humidity_penalty_per_pct: f64,
    pub heating_base_kwh: f64,
    pub heating_gain_per_c: f64,
    pub health_inefficiency: f64,
    pub clog_inefficiency: f64,
    pub fan_base_kwh: f64,
    pub fan_spread_kwh: f64,
    pub idle_kwh: f64,
    pub off_kwh: f64,
    pub power_jitter: f64,
    pub power_floor_kwh: f64,

    // Air side: supply offset from return air, refrigerant pressure
    pub cooling_supply_drop_c: f64,
    pub cooling_supply_spread_c: f64,
    pub heating_supply_rise_c: f64,
    pub heating_supply_spread_c: f64,
    pub cooling_refrigerant_psi: f64,
    pub cooling_refrigerant_spread_psi: f64,
    pub heating_refrigerant_psi: f64,
    pub heating_refrigerant_spread_psi: f64,
    pub standby_refrigerant_psi: f64,
    pub standby_refrigerant_spread_psi: f64,

    // Fault model
    pub clog_alarm_threshold: f64,
    pub clog_alarm_probability: f64,
    pub duct_base_pa: f64,
    pub duct_spread_pa: f64,
    pub duct_fan_base_pa: f64,
    pub duct_fan_spread_pa: f64,
    pub duct_clog_gain_pa: f64,
    pub duct_ceiling_pa: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        // ---
        Self {
            maintenance_month: Month::September,
            health_floor: 0.2,
            health_drift_max: 1e-4,
            clog_drift_max: 1e-3,
            serviced_clog_max: 0.05,
            serviced_health_min: 0.95,

            base_indoor_temp_c: 22.0,
            inertia_factor: 0.25,
            indoor_jitter_c: 1.5,
            set_point_spread_c: 2.0,

            delta_hi_c: 2.0,
            delta_lo_c: 1.0,
            co2_ventilation_ppm: 800.0,

            business_occupancy: 0.90,
            lunch_occupancy: 0.30,
            off_hours_occupancy: 0.10,
            co2_occupied_base_ppm: 600.0,
            co2_occupied_spread_ppm: 300.0,
            co2_vacant_base_ppm: 450.0,
            co2_vacant_spread_ppm: 50.0,

            cooling_base_kwh: 2.0,
            cooling_gain_per_c: 0.8,
            humidity_threshold_pct: 75.0,
            humidity_penalty_per_pct: 0.15,
            heating_base_kwh: 1.5,
            heating_gain_per_c: 0.5,
            health_inefficiency: 1.0,
            clog_inefficiency: 0.5,
            fan_base_kwh: 0.3,
            fan_spread_kwh: 0.1,
            idle_kwh: 0.05,
            off_kwh: 0.02,
            power_jitter: 0.05,
            power_floor_kwh: 0.01,

            cooling_supply_drop_c: 8.0,
            cooling_supply_spread_c: 4.0,
            heating_supply_rise_c: 5.0,
            heating_supply_spread_c: 3.0,
            cooling_refrigerant_psi: 150.0,
            cooling_refrigerant_spread_psi: 20.0,
            heating_refrigerant_psi: 100.0,
            heating_refrigerant_spread_psi: 5.0,
            standby_refrigerant_psi: 80.0,
            standby_refrigerant_spread_psi: 5.0,

            clog_alarm_threshold: 0.7,
            clog_alarm_probability: 0.5,
            duct_base_pa: 10.0,
            duct_spread_pa: 2.0,
            duct_fan_base_pa: 12.0,
            duct_fan_spread_pa: 1.0,
            duct_clog_gain_pa: 10.0,
            duct_ceiling_pa: 20.0,
        }
    }
}

impl SimulationParams {
    // ---
    /// Defaults with a different maintenance month.
    pub fn with_maintenance_month(month: Month) -> Self {
        Self {
            maintenance_month: month,
            ..Self::default()
        }
    }
}
