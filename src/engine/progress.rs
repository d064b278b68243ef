use log::debug;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64);
}

/// Reports generation progress through the log facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        debug!("Generation {} starting", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64) {
        debug!(
            "Generation {} complete. Best fitness: {:.4}",
            generation + 1,
            best_fitness
        );
    }
}

/// Discards all progress events.
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64) {}
}
