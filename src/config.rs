//! Configuration loader for the `hvac-telemetry-sim` generator.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chrono::Month;

use crate::hvac::{DeviceLabels, SimulationParams};
use crate::sink::{AwsCredentials, LocalSink, ObjectStoreSink, OutputFormat, Sink};

/// Parse an optional environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name).ok().filter(|v| !v.trim().is_empty())
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        optional_env!($var_name)
            .ok_or_else(|| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Where the encoded telemetry goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    // ---
    Local {
        dir: PathBuf,
    },
    ObjectStore {
        bucket: String,
        region: String,
        endpoint: Option<String>,
        /// `None` sends anonymous requests; only allowed with `endpoint` set.
        credentials: Option<AwsCredentials>,
    },
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// INMET export to read, `.csv` or `.zip`.
    pub climate_input_path: PathBuf,

    pub output_format: OutputFormat,

    pub sink: SinkTarget,

    /// Seed for the run's random generator; entropy when unset.
    pub seed: Option<u64>,

    /// Month (1-12) in which the unit is serviced.
    pub maintenance_month: u32,

    pub asset_model: String,

    pub location_zone: String,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `CLIMATE_INPUT_PATH` – source file (default: `data/inmet/dados-202401-202501.zip`)
/// - `OUTPUT_FORMAT` – `json` or `jsonl` (default: `json`)
/// - `SINK` – `local` or `s3` (default: `local`)
/// - `OUTPUT_DIR` – local sink directory (default: `output`)
/// - `AWS_REGION` – region for the default S3 endpoint (default: `us-east-1`)
/// - `ENDPOINT_URL` – S3-compatible endpoint override
/// - `SIM_SEED` – random seed (default: entropy)
/// - `MAINTENANCE_MONTH` – 1-12 (default: 9)
/// - `ASSET_MODEL`, `LOCATION_ZONE` – labels stamped on every record
///
/// Required when `SINK=s3`:
/// - `S3_BUCKET_NAME`
/// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` – unless `ENDPOINT_URL` points
///   at a store that takes anonymous writes; `AWS_SESSION_TOKEN` is optional
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let climate_input_path = PathBuf::from(
        optional_env!("CLIMATE_INPUT_PATH")
            .unwrap_or_else(|| "data/inmet/dados-202401-202501.zip".to_string()),
    );

    let output_format = optional_env!("OUTPUT_FORMAT")
        .map(|v| v.parse::<OutputFormat>())
        .transpose()
        .map_err(|e| anyhow!("Invalid OUTPUT_FORMAT: {}", e))?
        .unwrap_or_default();

    let sink_kind = optional_env!("SINK").unwrap_or_else(|| "local".to_string());
    let sink = match sink_kind.trim().to_ascii_lowercase().as_str() {
        "local" => SinkTarget::Local {
            dir: PathBuf::from(optional_env!("OUTPUT_DIR").unwrap_or_else(|| "output".into())),
        },
        "s3" => {
            let bucket = require_env!("S3_BUCKET_NAME");
            let region = optional_env!("AWS_REGION").unwrap_or_else(|| "us-east-1".into());
            let endpoint = optional_env!("ENDPOINT_URL");

            let credentials = match (
                optional_env!("AWS_ACCESS_KEY_ID"),
                optional_env!("AWS_SECRET_ACCESS_KEY"),
            ) {
                (Some(id), Some(secret)) => Some(
                    AwsCredentials::new(id, secret)
                        .with_session_token(optional_env!("AWS_SESSION_TOKEN")),
                ),
                (None, None) if endpoint.is_some() => None,
                (None, None) => bail!(
                    "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set to upload to AWS \
                     (or set ENDPOINT_URL for an anonymous S3-compatible store)"
                ),
                _ => bail!("AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"),
            };

            SinkTarget::ObjectStore {
                bucket,
                region,
                endpoint,
                credentials,
            }
        }
        other => bail!("Invalid SINK: '{}' (expected local or s3)", other),
    };

    let seed = optional_env!("SIM_SEED")
        .map(|v| v.trim().parse::<u64>())
        .transpose()
        .map_err(|e| anyhow!("Invalid SIM_SEED: {}", e))?;

    let maintenance_month = parse_env!("MAINTENANCE_MONTH", u32, 9);
    if !(1..=12).contains(&maintenance_month) {
        bail!("Invalid MAINTENANCE_MONTH: {} (expected 1-12)", maintenance_month);
    }

    let labels = DeviceLabels::default();
    let asset_model = optional_env!("ASSET_MODEL").unwrap_or(labels.asset_model);
    let location_zone = optional_env!("LOCATION_ZONE").unwrap_or(labels.location_zone);

    Ok(Config {
        climate_input_path,
        output_format,
        sink,
        seed,
        maintenance_month,
        asset_model,
        location_zone,
    })
}

impl Config {
    // ---
    pub fn simulation_params(&self) -> Result<SimulationParams> {
        // ---
        let month = u8::try_from(self.maintenance_month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| anyhow!("Invalid maintenance month {}", self.maintenance_month))?;
        Ok(SimulationParams::with_maintenance_month(month))
    }

    pub fn device_labels(&self) -> DeviceLabels {
        DeviceLabels {
            asset_model: self.asset_model.clone(),
            location_zone: self.location_zone.clone(),
            ..DeviceLabels::default()
        }
    }

    pub fn build_sink(&self) -> Sink {
        // ---
        match &self.sink {
            SinkTarget::Local { dir } => Sink::Local(LocalSink::new(dir)),
            SinkTarget::ObjectStore {
                bucket,
                region,
                endpoint,
                credentials,
            } => Sink::ObjectStore(ObjectStoreSink::new(
                bucket,
                region,
                endpoint.clone(),
                credentials.clone(),
            )),
        }
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let seed = self
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "<entropy>".to_string());

        tracing::info!("Configuration loaded:");
        tracing::info!("  CLIMATE_INPUT_PATH : {}", self.climate_input_path.display());
        tracing::info!("  OUTPUT_FORMAT      : {}", self.output_format);
        match &self.sink {
            SinkTarget::Local { dir } => {
                tracing::info!("  SINK               : local");
                tracing::info!("  OUTPUT_DIR         : {}", dir.display());
            }
            SinkTarget::ObjectStore {
                bucket,
                region,
                endpoint,
                credentials,
            } => {
                tracing::info!("  SINK               : s3");
                tracing::info!("  S3_BUCKET_NAME     : {}", bucket);
                tracing::info!("  AWS_REGION         : {}", region);
                tracing::info!(
                    "  ENDPOINT_URL       : {}",
                    endpoint.as_deref().unwrap_or("<default>")
                );
                tracing::info!(
                    "  AWS_ACCESS_KEY_ID  : {}",
                    credentials
                        .as_ref()
                        .map(|c| c.access_key_id.as_str())
                        .unwrap_or("<none, anonymous>")
                );
            }
        }
        tracing::info!("  SIM_SEED           : {}", seed);
        tracing::info!("  MAINTENANCE_MONTH  : {}", self.maintenance_month);
        tracing::info!("  ASSET_MODEL        : {}", self.asset_model);
        tracing::info!("  LOCATION_ZONE      : {}", self.location_zone);
    }
}
