use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use hvac_telemetry_sim::config::{Config, SinkTarget};
use hvac_telemetry_sim::pipeline;
use hvac_telemetry_sim::sink::{AwsCredentials, OutputFormat};
use serde::Deserialize;
use wiremock::matchers::{header_exists, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct TelemetryRow {
    timestamp: chrono::DateTime<Utc>,
    internal_temperature: f64,
    set_point_temperature: f64,
    system_status: String,
    occupancy_status: bool,
    power_consumption_kw_h: f64,
    outdoor_temperature: f64,
    outdoor_humidity: f64,
    device_id: String,
    supply_air_temperature: f64,
    return_air_temperature: f64,
    duct_static_pressure_pa: f64,
    co2_level_ppm: f64,
    refrigerant_pressure_psi: f64,
    fault_code: String,
    asset_model: String,
    location_zone: String,
}

// ---

fn scratch_dir(name: &str) -> PathBuf {
    // ---
    let dir = std::env::temp_dir()
        .join(format!("hvac-it-{}", std::process::id()))
        .join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Four weeks of hourly INMET rows with a warm, humid afternoon cycle.
fn write_inmet_csv(dir: &Path) -> PathBuf {
    // ---
    let mut text = String::new();
    for i in 0..9 {
        text.push_str(&format!("Preamble line {i}: value\n"));
    }
    text.push_str(
        "Data Medicao;Hora Medicao;TEMPERATURA DO AR - BULBO SECO, HORARIA(°C);\
         UMIDADE RELATIVA DO AR, HORARIA(%);\n",
    );

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for day in 0..28 {
        let date = start + Duration::days(day);
        for hour in 0..24 {
            let warmth = if (10..18).contains(&hour) { 12.0 } else { 0.0 };
            let temp = 20.0 + warmth + (day % 3) as f64;
            let humidity = 60.0 + warmth * 2.0;
            text.push_str(&format!(
                "{};{:02}00;{};{};\n",
                date.format("%Y-%m-%d"),
                hour,
                format!("{temp:.1}").replace('.', ","),
                format!("{humidity:.0}")
            ));
        }
    }
    // One broken row is tolerated.
    text.push_str("2024-01-29;0000;null;80;\n");

    let path = dir.join("station.csv");
    std::fs::write(&path, text).unwrap();
    path
}

fn config(input: PathBuf, sink: SinkTarget, format: OutputFormat) -> Config {
    // ---
    Config {
        climate_input_path: input,
        output_format: format,
        sink,
        seed: Some(2024),
        maintenance_month: 9,
        asset_model: "HVAC-Model-B".into(),
        location_zone: "Zone-A".into(),
    }
}

#[tokio::test]
async fn csv_to_local_json_end_to_end() -> Result<()> {
    // ---
    let dir = scratch_dir("local");
    let input = write_inmet_csv(&dir);
    let out_dir = dir.join("out");
    let cfg = config(
        input,
        SinkTarget::Local {
            dir: out_dir.clone(),
        },
        OutputFormat::Json,
    );

    let started = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
    let report = pipeline::run(&cfg, started).await?;

    let location = report.location.expect("a file should be written");
    assert!(location.ends_with("hvac_mock_data_20250115T100000Z.json"));
    assert_eq!(report.summary.records, 28 * 24);

    let rows: Vec<TelemetryRow> = serde_json::from_slice(&std::fs::read(&location)?)?;
    assert_eq!(rows.len(), 28 * 24);

    // Ordered 1:1 with the hourly input.
    for pair in rows.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
    }

    for row in &rows {
        assert!(row.power_consumption_kw_h > 0.0);
        assert!(row.co2_level_ppm >= 0.0);
        assert!(row.device_id.starts_with("ROOM-"));
        assert_eq!(row.asset_model, "HVAC-Model-B");
        assert_eq!(row.location_zone, "Zone-A");
        if !row.occupancy_status && row.system_status == "OFF" {
            assert!(row.power_consumption_kw_h < 0.05);
        }
    }

    // Warm occupied afternoons produce cooling.
    assert!(rows.iter().any(|r| r.system_status == "COOLING"));

    Ok(())
}

#[tokio::test]
async fn same_seed_gives_identical_files() -> Result<()> {
    // ---
    let dir = scratch_dir("determinism");
    let input = write_inmet_csv(&dir);
    let started = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();

    let first = config(
        input.clone(),
        SinkTarget::Local { dir: dir.join("a") },
        OutputFormat::JsonLines,
    );
    let second = config(
        input,
        SinkTarget::Local { dir: dir.join("b") },
        OutputFormat::JsonLines,
    );

    let a = pipeline::run(&first, started).await?.location.unwrap();
    let b = pipeline::run(&second, started).await?.location.unwrap();

    assert_eq!(std::fs::read(a)?, std::fs::read(b)?);
    Ok(())
}

#[tokio::test]
async fn csv_to_object_store_upload() -> Result<()> {
    // ---
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/hvac-telemetry/hvac_mock_data_\d{8}T\d{6}Z\.json$"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = scratch_dir("s3");
    let cfg = config(
        write_inmet_csv(&dir),
        SinkTarget::ObjectStore {
            bucket: "hvac-telemetry".into(),
            region: "us-east-1".into(),
            endpoint: Some(server.uri()),
            credentials: Some(AwsCredentials::new("AKIDEXAMPLE", "integration-secret")),
        },
        OutputFormat::Json,
    );

    let report = pipeline::run(&cfg, Utc::now()).await?;
    let url = report.location.unwrap();
    assert!(url.starts_with(&server.uri()));

    let requests = server.received_requests().await.unwrap();
    let authorization = requests[0].headers.get("authorization").unwrap().to_str()?;
    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    let uploaded: Vec<TelemetryRow> = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(uploaded.len(), 28 * 24);
    Ok(())
}

#[tokio::test]
async fn missing_input_fails_fast() {
    // ---
    let dir = scratch_dir("missing");
    let cfg = config(
        dir.join("does-not-exist.csv"),
        SinkTarget::Local {
            dir: dir.join("out"),
        },
        OutputFormat::Json,
    );

    let err = pipeline::run(&cfg, Utc::now()).await.unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.csv"));
    assert!(!dir.join("out").exists());
}
