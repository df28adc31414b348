//! End-of-run tallies for the log.

use std::collections::BTreeMap;

use crate::models::{FaultCode, SensorRecord, SystemStatus};

// ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    // ---
    pub records: usize,
    pub occupied: usize,
    pub total_energy_kwh: f64,
    pub by_status: BTreeMap<SystemStatus, usize>,
    pub by_fault: BTreeMap<FaultCode, usize>,
}

impl RunSummary {
    // ---
    pub fn from_records(records: &[SensorRecord]) -> Self {
        // ---
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.records += 1;
            summary.occupied += record.occupancy_status as usize;
            summary.total_energy_kwh += record.power_consumption_kwh;
            *summary.by_status.entry(record.system_status).or_default() += 1;
            *summary.by_fault.entry(record.fault_code).or_default() += 1;
            summary
        })
    }

    pub fn occupied_share(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.occupied as f64 / self.records as f64
        }
    }

    pub fn log(&self) {
        // ---
        tracing::info!("Run summary:");
        tracing::info!("  records        : {}", self.records);
        tracing::info!("  occupied share : {:.3}", self.occupied_share());
        tracing::info!("  total energy   : {:.1} kWh", self.total_energy_kwh);
        for (status, count) in &self.by_status {
            tracing::info!("  status {:<8}: {}", status.as_str(), count);
        }
        for (fault, count) in &self.by_fault {
            tracing::info!("  fault {:<9}: {}", fault.as_str(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::hvac::{DeviceLabels, Generator, SimulationParams};
    use crate::models::ClimateRecord;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_summary_counts_add_up() {
        // ---
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap();
        let climate: Vec<_> = (0..24 * 14)
            .map(|h| ClimateRecord::new(start + Duration::hours(h), 29.0, 70.0))
            .collect();
        let mut generator =
            Generator::new(SimulationParams::default(), DeviceLabels::default(), Some(31));
        let records = generator.generate_all(&climate);

        let summary = RunSummary::from_records(&records);
        assert_eq!(summary.records, records.len());
        assert_eq!(summary.by_status.values().sum::<usize>(), records.len());
        assert_eq!(summary.by_fault.values().sum::<usize>(), records.len());
        assert!(summary.total_energy_kwh > 0.0);
        assert!(summary.occupied_share() > 0.0 && summary.occupied_share() < 1.0);
    }

    #[test]
    fn test_empty_summary() {
        // ---
        let summary = RunSummary::from_records(&[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.occupied_share(), 0.0);
    }
}
