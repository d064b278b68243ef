use super::store::PlanStore;
use crate::config::{AppConfig, SchedulerConfig};
use crate::engine::{CancelFlag, LogProgressCallback, Optimizer};
use crate::error::{GridplanError, Result};
use crate::forecast::SnapshotProvider;
use chrono::Utc;
use log::{debug, info, warn};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Periodically re-plans against a fresh forecast snapshot and publishes the
/// result. A failed tick is logged and skipped; the previously published plan
/// stays authoritative.
pub struct Scheduler {
    provider: Box<dyn SnapshotProvider>,
    config: SchedulerConfig,
    optimizer: Optimizer,
    store: PlanStore,
    cancel: CancelFlag,
}

impl Scheduler {
    pub fn new(provider: Box<dyn SnapshotProvider>, config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let optimizer = Optimizer::new(
            config.optimizer.clone(),
            config.battery.clone(),
            config.fitness.to_weights(),
            config.scheduler.horizon_slots,
            config.scheduler.slot_hours(),
        )?;

        Ok(Self {
            provider,
            config: config.scheduler.clone(),
            optimizer,
            store: PlanStore::new(),
            cancel: CancelFlag::new(),
        })
    }

    /// Handle for querying published plans. Clones share the same store.
    pub fn store(&self) -> PlanStore {
        self.store.clone()
    }

    /// Handle for requesting shutdown from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// One fetch-optimize-publish cycle.
    ///
    /// Returns `Ok(true)` when a new plan was published, `Ok(false)` when the
    /// run was cancelled mid-flight. A malformed or stale snapshot is an
    /// `Environment` error; the caller keeps the previous plan.
    pub fn tick(&mut self) -> Result<bool> {
        let snapshot = self.provider.snapshot()?;
        snapshot.validate(self.config.horizon_slots)?;

        let age = snapshot.age_secs(Utc::now());
        if age > self.config.snapshot_max_age_secs {
            return Err(GridplanError::Environment(format!(
                "Snapshot is {}s old, tolerance is {}s",
                age, self.config.snapshot_max_age_secs
            )));
        }

        let warm_start = if self.config.warm_start {
            self.store.latest().map(|outcome| outcome.genotype)
        } else {
            None
        };

        let outcome = self.optimizer.run(
            &snapshot,
            warm_start.as_ref(),
            &self.cancel,
            &mut LogProgressCallback,
        )?;

        if outcome.cancelled {
            debug!("Optimization run cancelled; keeping the previously published plan");
            return Ok(false);
        }

        info!(
            "Published plan: fitness {:.4}, {} generations, {} ms{}",
            outcome.fitness,
            outcome.generations_run,
            outcome.duration_ms,
            if outcome.feasible { "" } else { " (infeasible)" }
        );
        self.store.publish(outcome);
        Ok(true)
    }

    /// Drive ticks until cancelled.
    ///
    /// At most one run is in flight at a time. A run that outlasts the
    /// interval absorbs the missed tick: the next fetch starts as soon as the
    /// run returns.
    pub fn run_loop(mut self) {
        let interval = Duration::from_secs(self.config.optimization_interval_secs);

        while !self.cancel.is_cancelled() {
            let started = Instant::now();

            if let Err(err) = self.tick() {
                warn!("Optimization tick skipped: {}", err);
            }

            // Wait out the rest of the interval, waking early on cancel.
            loop {
                if self.cancel.is_cancelled() {
                    return;
                }
                match interval.checked_sub(started.elapsed()) {
                    Some(remaining) if !remaining.is_zero() => {
                        thread::sleep(remaining.min(Duration::from_millis(250)));
                    }
                    _ => break,
                }
            }
        }
    }

    /// Run the tick loop on a background thread.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::Builder::new()
            .name("gridplan-scheduler".to_string())
            .spawn(move || self.run_loop())
            .expect("Failed to spawn scheduler thread")
    }
}
