use crate::error::{GridplanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast bundle covering the planning horizon.
///
/// All vectors share the same slot alignment: index `t` is the slot starting
/// `t * slot_minutes` after `taken_at`. The bundle is validated as a whole
/// before any optimization work; a bad vector is never truncated or padded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// Forecasted PV generation per slot, kW.
    pub pv_forecast_kw: Vec<f64>,
    /// Electricity price per slot, currency per kWh.
    pub price_per_kwh: Vec<f64>,
    /// Forecasted baseline household consumption per slot, kW. Providers
    /// without a load forecast supply zeros.
    pub load_forecast_kw: Vec<f64>,
    /// Battery state of charge at the start of the horizon, fraction in [0, 1].
    pub initial_soc: f64,
    pub taken_at: DateTime<Utc>,
}

impl EnvironmentSnapshot {
    pub fn validate(&self, horizon: usize) -> Result<()> {
        for (name, values) in [
            ("pv_forecast_kw", &self.pv_forecast_kw),
            ("price_per_kwh", &self.price_per_kwh),
            ("load_forecast_kw", &self.load_forecast_kw),
        ] {
            if values.len() != horizon {
                return Err(GridplanError::Environment(format!(
                    "{} has {} slots, expected {}",
                    name,
                    values.len(),
                    horizon
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(GridplanError::Environment(format!(
                    "{} contains a non-finite value",
                    name
                )));
            }
        }

        if !self.initial_soc.is_finite() || self.initial_soc < 0.0 || self.initial_soc > 1.0 {
            return Err(GridplanError::Environment(format!(
                "Initial SOC {} is outside [0, 1]",
                self.initial_soc
            )));
        }

        Ok(())
    }

    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.taken_at).num_seconds()
    }
}
