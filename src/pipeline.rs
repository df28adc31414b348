//! One generation run: climate file in, telemetry object out.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::hvac::{Generator, RunSummary};
use crate::{climate, sink, Config};

// ---

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    // ---
    pub summary: RunSummary,
    /// Path or URL of the persisted object; `None` when there was nothing to write.
    pub location: Option<String>,
}

/// Read, simulate, encode and persist.
///
/// Any collaborator failure aborts the run before anything partial is written.
pub async fn run(cfg: &Config, run_started: DateTime<Utc>) -> Result<RunReport> {
    // ---
    tracing::info!(
        "Reading climate data from {}",
        cfg.climate_input_path.display()
    );
    let climate = climate::read_inmet(&cfg.climate_input_path).with_context(|| {
        format!(
            "Failed to load climate data from '{}'",
            cfg.climate_input_path.display()
        )
    })?;

    if climate.is_empty() {
        tracing::warn!("No climate records found, nothing to generate");
        return Ok(RunReport {
            summary: RunSummary::default(),
            location: None,
        });
    }

    tracing::info!("Generating telemetry for {} climate records", climate.len());
    let mut generator = Generator::new(cfg.simulation_params()?, cfg.device_labels(), cfg.seed);
    let records = generator.generate_all(&climate);

    let summary = RunSummary::from_records(&records);
    summary.log();

    tracing::debug!("Encoding {} records as {}", records.len(), cfg.output_format);
    let data = sink::encode(&records, cfg.output_format).context("Failed to encode telemetry")?;

    let name = sink::object_name(run_started, cfg.output_format);
    let location = cfg
        .build_sink()
        .persist(&name, data)
        .await
        .with_context(|| format!("Failed to persist '{name}'"))?;

    Ok(RunReport {
        summary,
        location: Some(location),
    })
}
