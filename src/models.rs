//! Data carriers shared by ingestion, the simulation engine and the sinks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// One hourly outdoor observation from the climate source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    // ---
    pub timestamp: DateTime<Utc>,
    pub outdoor_temperature_c: f64,
    pub outdoor_relative_humidity_pct: f64,
}

impl ClimateRecord {
    // ---
    pub fn new(timestamp: DateTime<Utc>, temperature_c: f64, humidity_pct: f64) -> Self {
        // ---
        Self {
            timestamp,
            outdoor_temperature_c: temperature_c,
            outdoor_relative_humidity_pct: humidity_pct,
        }
    }
}

/// Operating mode of the simulated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Off,
    Idle,
    FanOnly,
    Cooling,
    Heating,
}

impl SystemStatus {
    // ---
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            SystemStatus::Off => "OFF",
            SystemStatus::Idle => "IDLE",
            SystemStatus::FanOnly => "FAN_ONLY",
            SystemStatus::Cooling => "COOLING",
            SystemStatus::Heating => "HEATING",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alarm emitted alongside each reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaultCode {
    #[serde(rename = "OK")]
    Ok,
    /// Compressor high-pressure alarm.
    #[serde(rename = "HP-AL-01")]
    HighPressure,
    /// Heating stage failure.
    #[serde(rename = "HT-FL-02")]
    HeatingFailure,
    /// Dirty filter.
    #[serde(rename = "FP-AL-01")]
    DirtyFilter,
    /// Duct static pressure above ceiling.
    #[serde(rename = "FP-AL-02")]
    DuctOverpressure,
}

impl FaultCode {
    // ---
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            FaultCode::Ok => "OK",
            FaultCode::HighPressure => "HP-AL-01",
            FaultCode::HeatingFailure => "HT-FL-02",
            FaultCode::DirtyFilter => "FP-AL-01",
            FaultCode::DuctOverpressure => "FP-AL-02",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesized telemetry for one timestamp.
///
/// Field names on the wire are consumed by dashboards; renaming any of them is a
/// breaking change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRecord {
    // ---
    pub timestamp: DateTime<Utc>,
    pub internal_temperature: f64,
    pub set_point_temperature: f64,
    pub system_status: SystemStatus,
    pub occupancy_status: bool,
    #[serde(rename = "powerConsumptionKwH")]
    pub power_consumption_kwh: f64,
    pub outdoor_temperature: f64,
    pub outdoor_humidity: f64,
    pub device_id: String,
    pub supply_air_temperature: f64,
    pub return_air_temperature: f64,
    pub duct_static_pressure_pa: f64,
    pub co2_level_ppm: f64,
    pub refrigerant_pressure_psi: f64,
    pub fault_code: FaultCode,
    pub asset_model: String,
    pub location_zone: String,
}
