use crate::engine::OptimizationOutcome;
use std::sync::{Arc, RwLock};

/// Latest published plan, shared between the scheduler thread and consumers.
///
/// Replacement is atomic: a reader sees either the previous outcome or the
/// new one in full, never a partial write. Cloning the store clones the
/// handle, not the plan.
#[derive(Clone, Default)]
pub struct PlanStore {
    inner: Arc<RwLock<Option<OptimizationOutcome>>>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published plan wholesale.
    pub fn publish(&self, outcome: OptimizationOutcome) {
        *self.inner.write().unwrap() = Some(outcome);
    }

    /// Most recently completed run, if any run has completed yet.
    pub fn latest(&self) -> Option<OptimizationOutcome> {
        self.inner.read().unwrap().clone()
    }
}
