use super::traits::ConfigSection;
use crate::engine::fitness::FitnessWeights;
use crate::error::GridplanError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Cost added per kWh of SOC-bound violation. Must dominate any realistic
    /// grid-cost swing so infeasible plans always rank behind feasible ones.
    pub penalty_weight: f64,
    /// Feed-in tariff as a fraction of the purchase price.
    pub export_factor: f64,
    /// Penalty on slot-to-slot command changes. 0 disables.
    pub smoothness_weight: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            penalty_weight: 1000.0,
            export_factor: 0.5,
            smoothness_weight: 0.0,
        }
    }
}

impl FitnessConfig {
    pub fn to_weights(&self) -> FitnessWeights {
        FitnessWeights {
            penalty_weight: self.penalty_weight,
            export_factor: self.export_factor,
            smoothness_weight: self.smoothness_weight,
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), GridplanError> {
        if self.penalty_weight <= 0.0 || !self.penalty_weight.is_finite() {
            return Err(GridplanError::Configuration(
                "Penalty weight must be positive and finite".to_string(),
            ));
        }
        if self.export_factor < 0.0 || self.export_factor > 1.0 {
            return Err(GridplanError::Configuration(
                "Export factor must be between 0 and 1".to_string(),
            ));
        }
        if self.smoothness_weight < 0.0 || !self.smoothness_weight.is_finite() {
            return Err(GridplanError::Configuration(
                "Smoothness weight must be non-negative and finite".to_string(),
            ));
        }
        Ok(())
    }
}
