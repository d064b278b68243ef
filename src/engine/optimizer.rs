use super::encoding::{decode, DecodedPlan, Genotype};
use super::fitness::{evaluate, FitnessWeights};
use super::operators::{crossover, mutate, random_genotype, tournament_selection};
use super::progress::ProgressCallback;
use crate::config::traits::ConfigSection;
use crate::config::{BatteryConfig, OptimizerConfig};
use crate::error::{GridplanError, Result};
use crate::forecast::EnvironmentSnapshot;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Cooperative cancellation handle shared between the scheduler and a running
/// optimization. Checked at generation boundaries only, so a cancelled run
/// never abandons a half-evaluated population.
#[derive(Clone, Default)]
pub struct CancelFlag {
    flag: Arc<Mutex<bool>>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if let Ok(mut flag) = self.flag.lock() {
            *flag = true;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.lock().map(|f| *f).unwrap_or(false)
    }
}

/// Result of one optimization run. Supersedes, never merges with, the
/// previous run's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub genotype: Genotype,
    pub plan: DecodedPlan,
    pub fitness: f64,
    pub generations_run: usize,
    pub duration_ms: u64,
    /// False when the best plan still carries SOC-bound violations.
    pub feasible: bool,
    /// True when the run was abandoned at a generation boundary.
    pub cancelled: bool,
    pub computed_at: DateTime<Utc>,
}

pub struct Optimizer {
    config: OptimizerConfig,
    battery: BatteryConfig,
    weights: FitnessWeights,
    horizon: usize,
    slot_hours: f64,
    rng: StdRng,
}

impl Optimizer {
    pub fn new(
        config: OptimizerConfig,
        battery: BatteryConfig,
        weights: FitnessWeights,
        horizon: usize,
        slot_hours: f64,
    ) -> Result<Self> {
        config.validate()?;
        battery.validate()?;
        if horizon == 0 {
            return Err(GridplanError::Configuration(
                "Horizon must contain at least 1 slot".to_string(),
            ));
        }
        if slot_hours <= 0.0 || !slot_hours.is_finite() {
            return Err(GridplanError::Configuration(
                "Slot duration must be positive and finite".to_string(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            battery,
            weights,
            horizon,
            slot_hours,
            rng,
        })
    }

    /// Run the evolutionary search against one forecast snapshot.
    ///
    /// The snapshot is validated before generation 0; a malformed bundle is a
    /// hard error, never silently truncated. With `generations = 0` the best
    /// of the evaluated initial population is returned.
    pub fn run<C: ProgressCallback>(
        &mut self,
        snapshot: &EnvironmentSnapshot,
        warm_start: Option<&Genotype>,
        cancel: &CancelFlag,
        callback: &mut C,
    ) -> Result<OptimizationOutcome> {
        snapshot.validate(self.horizon)?;
        let started = Instant::now();

        let mut population = self.initialize_population(warm_start);
        let mut evaluated = self.evaluate_population(&population, snapshot);

        let (mut best, mut best_fitness) = best_member(&evaluated);
        let mut generations_run = 0;
        let mut stalled = 0;
        let mut cancelled = false;

        for generation in 0..self.config.generations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            callback.on_generation_start(generation);

            population = self.next_generation(&evaluated);
            evaluated = self.evaluate_population(&population, snapshot);
            generations_run = generation + 1;

            let (generation_best, generation_best_fitness) = best_member(&evaluated);
            let improvement = best_fitness - generation_best_fitness;
            if generation_best_fitness < best_fitness {
                best = generation_best;
                best_fitness = generation_best_fitness;
            }
            callback.on_generation_complete(generation, best_fitness);

            if self.config.early_stop_patience > 0 {
                if improvement < self.config.early_stop_epsilon {
                    stalled += 1;
                } else {
                    stalled = 0;
                }
                if stalled >= self.config.early_stop_patience {
                    debug!(
                        "Stopping early after {} stalled generations",
                        stalled
                    );
                    break;
                }
            }
        }

        let plan = decode(&best, snapshot, &self.battery, self.slot_hours);
        let feasible = plan.is_feasible();
        if !feasible && !cancelled {
            warn!(
                "No fully feasible plan found within {} generations ({:.3} kWh of bound violations remain)",
                generations_run,
                plan.total_violation_kwh()
            );
        }

        Ok(OptimizationOutcome {
            genotype: best,
            plan,
            fitness: best_fitness,
            generations_run,
            duration_ms: started.elapsed().as_millis() as u64,
            feasible,
            cancelled,
            computed_at: Utc::now(),
        })
    }

    fn initialize_population(&mut self, warm_start: Option<&Genotype>) -> Vec<Genotype> {
        let mut population: Vec<Genotype> = (0..self.config.population_size)
            .map(|_| random_genotype(self.horizon, &mut self.rng))
            .collect();

        // Warm start: previous best rolled forward one slot, trailing slot idle.
        if let Some(previous) = warm_start {
            if previous.len() == self.horizon {
                let mut seeded: Genotype = previous[1..].to_vec();
                seeded.push(0.0);
                population[0] = seeded;
            }
        }

        population
    }

    fn evaluate_population(
        &self,
        population: &[Genotype],
        snapshot: &EnvironmentSnapshot,
    ) -> Vec<(Genotype, f64)> {
        population
            .par_iter()
            .map(|genotype| {
                let plan = decode(genotype, snapshot, &self.battery, self.slot_hours);
                let fitness = evaluate(
                    &plan,
                    genotype,
                    &snapshot.price_per_kwh,
                    &self.weights,
                    self.slot_hours,
                );
                (genotype.clone(), fitness)
            })
            .collect()
    }

    fn next_generation(&mut self, evaluated: &[(Genotype, f64)]) -> Vec<Genotype> {
        let mut next_generation = Vec::with_capacity(self.config.population_size);

        // Elitism: carry the current best over unchanged
        if self.config.elitism {
            let (elite, _) = best_member(evaluated);
            next_generation.push(elite);
        }

        // Generate offspring
        while next_generation.len() < self.config.population_size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);
                let parent2 =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);

                let (mut child1, mut child2) = crossover(&parent1, &parent2, &mut self.rng);

                mutate(
                    &mut child1,
                    self.config.mutation_rate,
                    self.config.mutation_step,
                    &mut self.rng,
                );
                mutate(
                    &mut child2,
                    self.config.mutation_rate,
                    self.config.mutation_step,
                    &mut self.rng,
                );

                next_generation.push(child1);
                if next_generation.len() < self.config.population_size {
                    next_generation.push(child2);
                }
            } else {
                // Reproduction (copy)
                let mut child =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);
                mutate(
                    &mut child,
                    self.config.mutation_rate,
                    self.config.mutation_step,
                    &mut self.rng,
                );
                next_generation.push(child);
            }
        }

        next_generation.truncate(self.config.population_size);
        next_generation
    }
}

fn best_member(evaluated: &[(Genotype, f64)]) -> (Genotype, f64) {
    let mut best_idx = 0;
    for (idx, (_, fitness)) in evaluated.iter().enumerate() {
        if *fitness < evaluated[best_idx].1 {
            best_idx = idx;
        }
    }
    (evaluated[best_idx].0.clone(), evaluated[best_idx].1)
}
