//! Output encoding and persistence of generated telemetry.
//!
//! Gateway module (EMBP): `local` writes to disk, `object_store` uploads to an
//! S3-compatible bucket and `signing` produces the SigV4 headers for it. Callers
//! only see [`Sink`], [`OutputFormat`], [`AwsCredentials`] and the encoding
//! helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::SensorRecord;

mod local;
mod object_store;
mod signing;

pub use local::LocalSink;
pub use object_store::ObjectStoreSink;
pub use signing::AwsCredentials;

// ---

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize telemetry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid object URL '{url}': {reason}")]
    Endpoint { url: String, reason: String },

    #[error("Upload to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upload to '{url}' rejected with status {status}: {body}")]
    Rejected {
        url: String,
        status: u16,
        body: String,
    },
}

/// Serialized layout of the output object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// One compact JSON object per line.
    JsonLines,
}

impl OutputFormat {
    // ---
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::JsonLines => "jsonl",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::JsonLines),
            other => Err(format!("unknown output format '{other}' (expected json or jsonl)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode records in the requested format.
pub fn encode(records: &[SensorRecord], format: OutputFormat) -> Result<Vec<u8>, SinkError> {
    // ---
    match format {
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
        OutputFormat::JsonLines => {
            let mut out = Vec::with_capacity(records.len() * 512);
            for record in records {
                serde_json::to_writer(&mut out, record)?;
                out.push(b'\n');
            }
            Ok(out)
        }
    }
}

/// Object name for a run started at `run_started`.
pub fn object_name(run_started: DateTime<Utc>, format: OutputFormat) -> String {
    format!(
        "hvac_mock_data_{}.{}",
        run_started.format("%Y%m%dT%H%M%SZ"),
        format.extension()
    )
}

/// Destination for the encoded telemetry.
#[derive(Debug, Clone)]
pub enum Sink {
    Local(LocalSink),
    ObjectStore(ObjectStoreSink),
}

impl Sink {
    // ---
    /// Persist `data` under `name` and return where it ended up.
    pub async fn persist(&self, name: &str, data: Vec<u8>) -> Result<String, SinkError> {
        // ---
        match self {
            Sink::Local(sink) => sink
                .write(name, &data)
                .map(|path| path.display().to_string()),
            Sink::ObjectStore(sink) => sink.upload(name, data).await,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::{FaultCode, SystemStatus};
    use chrono::TimeZone;

    fn record(hour: u32) -> SensorRecord {
        // ---
        SensorRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap(),
            internal_temperature: 25.0,
            set_point_temperature: 22.0,
            system_status: SystemStatus::Cooling,
            occupancy_status: true,
            power_consumption_kwh: 6.2,
            outdoor_temperature: 34.0,
            outdoor_humidity: 80.0,
            device_id: "ROOM-1".to_string(),
            supply_air_temperature: 15.0,
            return_air_temperature: 25.0,
            duct_static_pressure_pa: 11.0,
            co2_level_ppm: 700.0,
            refrigerant_pressure_psi: 160.0,
            fault_code: FaultCode::Ok,
            asset_model: "HVAC-Model-B".to_string(),
            location_zone: "Zone-A".to_string(),
        }
    }

    #[test]
    fn test_json_is_pretty_array() {
        // ---
        let bytes = encode(&[record(9), record(10)], OutputFormat::Json).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("[\n  {"));
        let parsed: Vec<SensorRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].timestamp.format("%H").to_string(), "10");
    }

    #[test]
    fn test_json_lines_one_object_per_line() {
        // ---
        let bytes = encode(&[record(9), record(10), record(11)], OutputFormat::JsonLines).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["systemStatus"], "COOLING");
        }
    }

    #[test]
    fn test_empty_run_encodes_empty_array() {
        // ---
        assert_eq!(encode(&[], OutputFormat::Json).unwrap(), b"[]");
        assert!(encode(&[], OutputFormat::JsonLines).unwrap().is_empty());
    }

    #[test]
    fn test_object_name() {
        // ---
        let started = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
        assert_eq!(
            object_name(started, OutputFormat::Json),
            "hvac_mock_data_20250203T040506Z.json"
        );
        assert_eq!(
            object_name(started, OutputFormat::JsonLines),
            "hvac_mock_data_20250203T040506Z.jsonl"
        );
    }

    #[test]
    fn test_output_format_parsing() {
        // ---
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" JSONL ".parse::<OutputFormat>(), Ok(OutputFormat::JsonLines));
        assert_eq!("ndjson".parse::<OutputFormat>(), Ok(OutputFormat::JsonLines));
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
