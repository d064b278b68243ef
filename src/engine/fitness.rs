use super::encoding::DecodedPlan;

/// Weighting between the cost, penalty and smoothness terms.
///
/// The penalty weight must dominate any realistic grid-cost swing so that a
/// plan with a nonzero violation never outranks a feasible one.
#[derive(Debug, Clone, Copy)]
pub struct FitnessWeights {
    pub penalty_weight: f64,
    pub export_factor: f64,
    pub smoothness_weight: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            penalty_weight: 1000.0,
            export_factor: 0.5,
            smoothness_weight: 0.0,
        }
    }
}

/// Score a decoded plan. Lower is strictly better.
///
/// Deterministic: identical inputs always yield the identical scalar. Any
/// non-finite intermediate collapses to `f64::INFINITY` so a degenerate
/// genotype loses every comparison instead of poisoning the generation.
pub fn evaluate(
    plan: &DecodedPlan,
    genotype: &[f64],
    price_per_kwh: &[f64],
    weights: &FitnessWeights,
    slot_hours: f64,
) -> f64 {
    let mut cost = 0.0;
    for (grid_kw, price) in plan.grid_kw.iter().zip(price_per_kwh) {
        let energy_kwh = grid_kw * slot_hours;
        if energy_kwh >= 0.0 {
            // Import billed at the full rate.
            cost += energy_kwh * price;
        } else {
            // Export credited at the feed-in fraction of the rate.
            cost += energy_kwh * price * weights.export_factor;
        }
    }

    let penalty = weights.penalty_weight * plan.total_violation_kwh();

    let mut smoothness = 0.0;
    if weights.smoothness_weight > 0.0 {
        for pair in genotype.windows(2) {
            let step = pair[1] - pair[0];
            smoothness += step * step;
        }
        smoothness *= weights.smoothness_weight;
    }

    let fitness = cost + penalty + smoothness;
    if fitness.is_finite() {
        fitness
    } else {
        f64::INFINITY
    }
}
