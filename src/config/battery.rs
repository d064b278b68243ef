use super::traits::ConfigSection;
use crate::error::GridplanError;
use serde::{Deserialize, Serialize};

/// Physical battery parameters. SOC values are fractions of capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub capacity_kwh: f64,
    pub max_charge_kw: f64,
    pub max_discharge_kw: f64,
    pub min_soc: f64,
    pub max_soc: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 10.0,
            max_charge_kw: 3.0,
            max_discharge_kw: 3.0,
            min_soc: 0.1,
            max_soc: 0.95,
        }
    }
}

impl ConfigSection for BatteryConfig {
    fn section_name() -> &'static str {
        "battery"
    }

    fn validate(&self) -> Result<(), GridplanError> {
        if self.capacity_kwh <= 0.0 || !self.capacity_kwh.is_finite() {
            return Err(GridplanError::Configuration(
                "Battery capacity must be positive and finite".to_string(),
            ));
        }
        if self.max_charge_kw <= 0.0 || self.max_discharge_kw <= 0.0 {
            return Err(GridplanError::Configuration(
                "Charge and discharge power limits must be positive".to_string(),
            ));
        }
        if self.min_soc < 0.0 || self.max_soc > 1.0 || self.min_soc >= self.max_soc {
            return Err(GridplanError::Configuration(
                "SOC bounds must satisfy 0 <= min_soc < max_soc <= 1".to_string(),
            ));
        }
        Ok(())
    }
}
