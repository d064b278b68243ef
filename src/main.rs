use anyhow::Context;
use gridplan::config::ConfigManager;
use gridplan::forecast::SyntheticProvider;
use gridplan::scheduler::Scheduler;
use log::info;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?;
    }
    let config = manager.get();

    let provider = SyntheticProvider::new(
        config.scheduler.horizon_slots,
        config.optimizer.seed.unwrap_or(0),
    );
    let scheduler = Scheduler::new(Box::new(provider), &config)?;
    let store = scheduler.store();

    info!(
        "Starting planner: {} slots of {} min, re-planning every {}s",
        config.scheduler.horizon_slots,
        config.scheduler.slot_minutes,
        config.scheduler.optimization_interval_secs
    );

    let handle = scheduler.spawn();

    // Mirror the latest published plan to stdout once per interval.
    loop {
        std::thread::sleep(Duration::from_secs(
            config.scheduler.optimization_interval_secs,
        ));
        if let Some(outcome) = store.latest() {
            println!("{}", serde_json::to_string(&outcome)?);
        }
        if handle.is_finished() {
            break;
        }
    }

    Ok(())
}
