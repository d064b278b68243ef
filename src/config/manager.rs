use super::{
    battery::BatteryConfig, fitness::FitnessConfig, optimizer::OptimizerConfig,
    scheduler::SchedulerConfig, traits::ConfigSection,
};
use crate::error::GridplanError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub battery: BatteryConfig,
    pub scheduler: SchedulerConfig,
    pub fitness: FitnessConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GridplanError> {
        self.optimizer.validate()?;
        self.battery.validate()?;
        self.scheduler.validate()?;
        self.fitness.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GridplanError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GridplanError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| GridplanError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GridplanError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| GridplanError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GridplanError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), GridplanError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut updated = self.config.read().unwrap().clone();
        f(&mut updated);
        updated.validate()?;
        *self.config.write().unwrap() = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
