//! INMET hourly climate reader.
//!
//! INMET station exports are `;`-separated with a nine-line station preamble, a
//! header on line ten, decimal commas, and times written as `HHMM`. They often
//! ship zipped. This module turns one of those files into ordered
//! [`ClimateRecord`]s and is the only place in the crate that knows the format.
//!
//! Structural problems (missing columns, unknown extension, empty archive) abort
//! the read. Individual rows that cannot be parsed are skipped with a warning.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ByteRecord;
use thiserror::Error;

use crate::models::ClimateRecord;

// ---

const PREAMBLE_LINES: usize = 9;

const COL_DATE: &str = "data medicao";
const COL_TIME: &str = "hora medicao";
const COL_TEMPERATURE: &str = "temperatura do ar - bulbo seco, horaria";
const COL_HUMIDITY: &str = "umidade relativa do ar, horaria";

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format '{0}', expected .csv or .zip")]
    UnsupportedFormat(String),

    #[error("Failed to read ZIP archive '{}': {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("No CSV file found inside ZIP '{}'", .0.display())]
    NoCsvInArchive(PathBuf),

    #[error("CSV read error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV header is missing required columns {missing:?}; found {found:?}")]
    MissingColumns {
        missing: Vec<&'static str>,
        found: Vec<String>,
    },

    #[error("CSV ended before the header line that follows the station preamble")]
    MissingHeader,
}

/// Read climate records from a `.csv` or `.zip` INMET export.
pub fn read_inmet(path: impl AsRef<Path>) -> Result<Vec<ClimateRecord>, ClimateError> {
    // ---
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let open = |path: &Path| {
        File::open(path).map_err(|source| ClimateError::Open {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_str() {
        "csv" => parse_inmet(BufReader::new(open(path)?)),
        "zip" => {
            let archive_err = |source| ClimateError::Archive {
                path: path.to_path_buf(),
                source,
            };
            let mut archive = zip::ZipArchive::new(open(path)?).map_err(archive_err)?;

            let name = archive
                .file_names()
                .find(|name| name.to_ascii_lowercase().ends_with(".csv"))
                .map(str::to_string)
                .ok_or_else(|| ClimateError::NoCsvInArchive(path.to_path_buf()))?;

            let entry = archive.by_name(&name).map_err(archive_err)?;
            tracing::debug!("Reading '{}' from archive '{}'", name, path.display());
            parse_inmet(entry)
        }
        other => Err(ClimateError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse INMET CSV content from any reader.
pub fn parse_inmet<R: Read>(reader: R) -> Result<Vec<ClimateRecord>, ClimateError> {
    // ---
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut row = ByteRecord::new();
    let mut line = 0usize;

    let columns = loop {
        line += 1;
        if !read_row(&mut csv_reader, &mut row, line)? {
            return Err(ClimateError::MissingHeader);
        }
        if line > PREAMBLE_LINES {
            break Columns::from_header(&row)?;
        }
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    loop {
        line += 1;
        if !read_row(&mut csv_reader, &mut row, line)? {
            break;
        }
        match columns.parse_row(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                tracing::warn!("Skipping line {}: {}", line, reason);
            }
        }
    }

    // Station exports are chronological, but a concatenated file may not be.
    records.sort_by_key(|record| record.timestamp);

    tracing::info!(
        "Parsed {} climate records ({} rows skipped)",
        records.len(),
        skipped
    );
    Ok(records)
}

fn read_row<R: Read>(
    reader: &mut csv::Reader<R>,
    row: &mut ByteRecord,
    line: usize,
) -> Result<bool, ClimateError> {
    reader
        .read_byte_record(row)
        .map_err(|source| ClimateError::Csv { line, source })
}

struct Columns {
    date: usize,
    time: usize,
    temperature: usize,
    humidity: usize,
}

impl Columns {
    // ---
    fn from_header(header: &ByteRecord) -> Result<Self, ClimateError> {
        // ---
        let names: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(idx, raw)| (normalize_column(&String::from_utf8_lossy(raw)), idx))
            .collect();

        let lookup = |name: &str| names.get(name).copied();
        match (
            lookup(COL_DATE),
            lookup(COL_TIME),
            lookup(COL_TEMPERATURE),
            lookup(COL_HUMIDITY),
        ) {
            (Some(date), Some(time), Some(temperature), Some(humidity)) => Ok(Self {
                date,
                time,
                temperature,
                humidity,
            }),
            _ => {
                let missing = [COL_DATE, COL_TIME, COL_TEMPERATURE, COL_HUMIDITY]
                    .into_iter()
                    .filter(|name| !names.contains_key(*name))
                    .collect();
                let mut found: Vec<String> = names.into_keys().collect();
                found.sort();
                Err(ClimateError::MissingColumns { missing, found })
            }
        }
    }

    fn parse_row(&self, row: &ByteRecord) -> Result<ClimateRecord, String> {
        // ---
        let field = |idx: usize| -> Result<String, String> {
            row.get(idx)
                .map(|raw| String::from_utf8_lossy(raw).trim().to_string())
                .ok_or_else(|| format!("row has only {} fields", row.len()))
        };

        let date_raw = field(self.date)?;
        let time_raw = field(self.time)?;

        let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|e| format!("bad date '{date_raw}': {e}"))?;
        let time = parse_hhmm(&time_raw).ok_or_else(|| format!("bad time '{time_raw}'"))?;
        let timestamp = NaiveDateTime::new(date, time).and_utc();

        let temperature = parse_decimal(&field(self.temperature)?)
            .map_err(|raw| format!("bad air temperature '{raw}'"))?;
        let humidity = parse_decimal(&field(self.humidity)?)
            .map_err(|raw| format!("bad relative humidity '{raw}'"))?;

        Ok(ClimateRecord::new(timestamp, temperature, humidity))
    }
}

/// Lowercase, trim and drop any trailing unit such as `(°C)`.
fn normalize_column(raw: &str) -> String {
    // ---
    let name = raw.trim().to_lowercase();
    match name.split_once('(') {
        Some((head, _)) => head.trim().to_string(),
        None => name,
    }
}

/// `HHMM` or `HMM`, as INMET writes hours.
fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    // ---
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match raw.len() {
        4 => (&raw[..2], &raw[2..]),
        3 => (&raw[..1], &raw[1..]),
        _ => return None,
    };
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Decimal-comma float; empty and `null` cells are rejected.
fn parse_decimal(raw: &str) -> Result<f64, String> {
    // ---
    let value: f64 = raw.replace(',', ".").parse().map_err(|_| raw.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(raw.to_string())
    }
}
