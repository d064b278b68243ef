use super::traits::ConfigSection;
use crate::error::GridplanError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between optimization runs.
    pub optimization_interval_secs: u64,
    /// Number of planning slots in one horizon.
    pub horizon_slots: usize,
    pub slot_minutes: u32,
    /// Snapshots older than this are rejected and the tick is skipped.
    pub snapshot_max_age_secs: i64,
    /// Seed one population member from the previous best plan, shifted one slot.
    pub warm_start: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            optimization_interval_secs: 300,
            horizon_slots: 96,
            slot_minutes: 15,
            snapshot_max_age_secs: 600,
            warm_start: true,
        }
    }
}

impl SchedulerConfig {
    pub fn slot_hours(&self) -> f64 {
        f64::from(self.slot_minutes) / 60.0
    }
}

impl ConfigSection for SchedulerConfig {
    fn section_name() -> &'static str {
        "scheduler"
    }

    fn validate(&self) -> Result<(), GridplanError> {
        if self.optimization_interval_secs == 0 {
            return Err(GridplanError::Configuration(
                "Optimization interval must be at least 1 second".to_string(),
            ));
        }
        if self.horizon_slots == 0 {
            return Err(GridplanError::Configuration(
                "Horizon must contain at least 1 slot".to_string(),
            ));
        }
        if self.slot_minutes == 0 {
            return Err(GridplanError::Configuration(
                "Slot duration must be at least 1 minute".to_string(),
            ));
        }
        if self.snapshot_max_age_secs <= 0 {
            return Err(GridplanError::Configuration(
                "Snapshot maximum age must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
