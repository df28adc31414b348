//! Synthetic HVAC telemetry from real climate observations.
//!
//! The crate follows the Explicit Module Boundary Pattern (EMBP): each top-level
//! module is a gateway that exposes only what its siblings need.
//!
//! - `climate`  – INMET CSV/ZIP ingestion
//! - `hvac`     – the stateful simulation engine
//! - `sink`     – JSON encoding and local / object-store persistence
//! - `config`   – environment-driven configuration
//! - `pipeline` – one end-to-end run

pub mod climate;
pub mod config;
pub mod hvac;
pub mod models;
pub mod pipeline;
pub mod sink;

pub use config::Config;
pub use models::{ClimateRecord, FaultCode, SensorRecord, SystemStatus};
