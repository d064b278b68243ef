pub mod battery;
pub mod fitness;
pub mod manager;
pub mod optimizer;
pub mod scheduler;
pub mod traits;

pub use battery::BatteryConfig;
pub use fitness::FitnessConfig;
pub use manager::{AppConfig, ConfigManager};
pub use optimizer::OptimizerConfig;
pub use scheduler::SchedulerConfig;
