pub mod provider;
pub mod snapshot;

pub use provider::{SnapshotProvider, SyntheticProvider};
pub use snapshot::EnvironmentSnapshot;
