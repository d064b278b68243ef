use super::traits::ConfigSection;
use crate::error::GridplanError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    /// Maximum absolute change applied to a gene by one mutation.
    pub mutation_step: f64,
    pub tournament_size: usize,
    pub elitism: bool,
    /// Best-fitness improvement below this counts as a stalled generation.
    pub early_stop_epsilon: f64,
    /// Stalled generations tolerated before stopping early. 0 disables.
    pub early_stop_patience: usize,
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 60,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            mutation_step: 0.25,
            tournament_size: 3,
            elitism: true,
            early_stop_epsilon: 1e-6,
            early_stop_patience: 0,
            seed: None,
        }
    }
}

impl ConfigSection for OptimizerConfig {
    fn section_name() -> &'static str {
        "optimizer"
    }

    fn validate(&self) -> Result<(), GridplanError> {
        if self.population_size < 2 {
            return Err(GridplanError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(GridplanError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.crossover_rate < 0.0 || self.crossover_rate > 1.0 {
            return Err(GridplanError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if self.mutation_step <= 0.0 || !self.mutation_step.is_finite() {
            return Err(GridplanError::Configuration(
                "Mutation step must be positive and finite".to_string(),
            ));
        }
        if self.tournament_size < 1 || self.tournament_size > self.population_size {
            return Err(GridplanError::Configuration(
                "Tournament size must be between 1 and the population size".to_string(),
            ));
        }
        if self.early_stop_epsilon < 0.0 || !self.early_stop_epsilon.is_finite() {
            return Err(GridplanError::Configuration(
                "Early-stop epsilon must be non-negative and finite".to_string(),
            ));
        }
        Ok(())
    }
}
