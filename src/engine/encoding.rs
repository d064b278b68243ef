use crate::config::BatteryConfig;
use crate::forecast::EnvironmentSnapshot;
use serde::{Deserialize, Serialize};

/// Genotype representation for the dispatch search
///
/// A genotype is a sequence of per-slot battery commands in `[-1.0, 1.0]`:
/// positive values charge at that fraction of `max_charge_kw`, negative
/// values discharge at that fraction of `max_discharge_kw`, zero holds.
///
/// # Why a flat command sequence?
///
/// Genetic operators work best on simple, linear structures:
/// - **Crossover**: swapping slot ranges is trivial (array slicing)
/// - **Mutation**: nudging individual slots is straightforward
/// - **No invalid states**: any command sequence decodes to a physically
///   realizable trajectory, with bound overshoots scored rather than rejected
///
/// Use [`decode`] to turn a genotype plus an environment into the realized
/// SOC/power/grid trajectories.
pub type Genotype = Vec<f64>;

/// Physically realized trajectory decoded from one genotype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedPlan {
    /// State of charge per slot boundary, length `H + 1`.
    pub soc: Vec<f64>,
    /// Realized battery power per slot, kW, positive = charging. Length `H`.
    pub battery_kw: Vec<f64>,
    /// Grid exchange per slot, kW, positive = import. Length `H`.
    pub grid_kw: Vec<f64>,
    /// Energy the unclipped trajectory overshot the SOC bounds, kWh per slot.
    pub violations_kwh: Vec<f64>,
}

impl DecodedPlan {
    pub fn total_violation_kwh(&self) -> f64 {
        self.violations_kwh.iter().sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.total_violation_kwh() == 0.0
    }
}

/// Decode a genotype into its realized dispatch trajectory.
///
/// Pure function of its inputs. Commands are clamped to the decision domain,
/// scaled to power, and integrated into SOC slot by slot. Where the unclipped
/// SOC would leave `[min_soc, max_soc]` the trajectory is clamped and the
/// overshoot recorded as that slot's violation; the realized battery power is
/// back-computed from the clamped SOC delta so the trace stays consistent.
pub fn decode(
    genotype: &[f64],
    snapshot: &EnvironmentSnapshot,
    battery: &BatteryConfig,
    slot_hours: f64,
) -> DecodedPlan {
    let horizon = genotype.len();
    let mut soc = Vec::with_capacity(horizon + 1);
    let mut battery_kw = Vec::with_capacity(horizon);
    let mut grid_kw = Vec::with_capacity(horizon);
    let mut violations_kwh = Vec::with_capacity(horizon);

    let mut current_soc = snapshot.initial_soc;
    soc.push(current_soc);

    for (t, raw) in genotype.iter().enumerate() {
        let command = raw.clamp(-1.0, 1.0);
        let requested_kw = if command >= 0.0 {
            command * battery.max_charge_kw
        } else {
            command * battery.max_discharge_kw
        };

        let unclipped = current_soc + requested_kw * slot_hours / battery.capacity_kwh;
        let clamped = unclipped.clamp(battery.min_soc, battery.max_soc);
        violations_kwh.push((unclipped - clamped).abs() * battery.capacity_kwh);

        let realized_kw = (clamped - current_soc) * battery.capacity_kwh / slot_hours;
        battery_kw.push(realized_kw);
        grid_kw.push(snapshot.load_forecast_kw[t] - snapshot.pv_forecast_kw[t] + realized_kw);

        current_soc = clamped;
        soc.push(current_soc);
    }

    DecodedPlan {
        soc,
        battery_kw,
        grid_kw,
        violations_kwh,
    }
}
