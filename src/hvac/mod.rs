//! Climate-to-telemetry simulation engine.
//!
//! This is the gateway for the engine (EMBP): each sibling module owns one model
//! and the gateway re-exports only the run-level types, i.e. the generator with
//! its inputs and the summary. The models are pure functions over their inputs
//! plus a borrowed random generator; only [`Generator`] holds state between
//! records.
//!
//! - `asset`     – wear and maintenance of the unit
//! - `thermal`   – free-running indoor temperature and set-point
//! - `occupancy` – presence schedule and CO₂ proxy
//! - `control`   – operating-mode selection
//! - `energy`    – power draw and refrigerant-side readings
//! - `fault`     – duct pressure and alarm rules
//! - `generator` – per-record orchestration
//! - `summary`   – end-of-run tallies

mod asset;
mod control;
mod energy;
mod fault;
mod generator;
mod occupancy;
mod params;
mod summary;
mod thermal;

pub use asset::AssetState;
pub use generator::{DeviceLabels, Generator, Overrides};
pub use params::SimulationParams;
pub use summary::RunSummary;
