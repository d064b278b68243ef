pub mod encoding;
pub mod fitness;
pub mod operators;
pub mod optimizer;
pub mod progress;

pub use encoding::{decode, DecodedPlan, Genotype};
pub use fitness::{evaluate, FitnessWeights};
pub use optimizer::{CancelFlag, OptimizationOutcome, Optimizer};
pub use progress::{LogProgressCallback, NullProgressCallback, ProgressCallback};
