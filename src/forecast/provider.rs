use super::snapshot::EnvironmentSnapshot;
use crate::error::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of forecast snapshots. The host integration implements this against
/// its own PV/price/SOC readings; the scheduler only ever sees the trait.
pub trait SnapshotProvider: Send {
    fn snapshot(&mut self) -> Result<EnvironmentSnapshot>;
}

/// Self-contained provider producing a plausible day profile: a daylight bell
/// for PV, prices that dip while the sun is up, and a lightly jittered base
/// load. Used by the demo binary and for exercising the scheduler without a
/// real integration behind it.
pub struct SyntheticProvider {
    horizon: usize,
    peak_pv_kw: f64,
    base_load_kw: f64,
    initial_soc: f64,
    rng: StdRng,
}

impl SyntheticProvider {
    pub fn new(horizon: usize, seed: u64) -> Self {
        Self {
            horizon,
            peak_pv_kw: 4.0,
            base_load_kw: 0.4,
            initial_soc: 0.5,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SnapshotProvider for SyntheticProvider {
    fn snapshot(&mut self) -> Result<EnvironmentSnapshot> {
        let mut pv_forecast_kw = Vec::with_capacity(self.horizon);
        let mut price_per_kwh = Vec::with_capacity(self.horizon);
        let mut load_forecast_kw = Vec::with_capacity(self.horizon);

        for t in 0..self.horizon {
            let day_frac = t as f64 / self.horizon as f64;

            // Daylight bell between 25% and 75% of the day.
            let sun = if (0.25..0.75).contains(&day_frac) {
                (std::f64::consts::PI * (day_frac - 0.25) / 0.5).sin()
            } else {
                0.0
            };
            pv_forecast_kw.push(self.peak_pv_kw * sun);

            // Cheap around solar noon, expensive at the evening ramp.
            let price = 0.30 - 0.12 * sun + self.rng.gen_range(-0.01..0.01);
            price_per_kwh.push(price.max(0.01));

            let load = self.base_load_kw
                + 0.3 * (2.0 * std::f64::consts::PI * day_frac).sin().abs()
                + self.rng.gen_range(0.0..0.05);
            load_forecast_kw.push(load);
        }

        Ok(EnvironmentSnapshot {
            pv_forecast_kw,
            price_per_kwh,
            load_forecast_kw,
            initial_soc: self.initial_soc,
            taken_at: Utc::now(),
        })
    }
}
