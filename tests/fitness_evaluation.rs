use gridplan::engine::fitness::{evaluate, FitnessWeights};
use gridplan::engine::DecodedPlan;

fn make_plan(grid_kw: Vec<f64>, violations_kwh: Vec<f64>) -> DecodedPlan {
    let horizon = grid_kw.len();
    DecodedPlan {
        soc: vec![0.5; horizon + 1],
        battery_kw: vec![0.0; horizon],
        grid_kw,
        violations_kwh,
    }
}

fn make_weights() -> FitnessWeights {
    FitnessWeights {
        penalty_weight: 1000.0,
        export_factor: 0.5,
        smoothness_weight: 0.0,
    }
}

#[test]
fn evaluate_is_deterministic() {
    let plan = make_plan(vec![1.2, -0.4, 0.0], vec![0.0, 0.1, 0.0]);
    let genotype = vec![0.3, -0.1, 0.0];
    let prices = vec![0.3, 0.1, 0.2];
    let weights = make_weights();

    let first = evaluate(&plan, &genotype, &prices, &weights, 0.25);
    let second = evaluate(&plan, &genotype, &prices, &weights, 0.25);

    assert_eq!(first, second);
}

#[test]
fn import_billed_fully_export_credited_at_feed_in_rate() {
    let weights = make_weights();

    let import = make_plan(vec![1.0], vec![0.0]);
    assert!((evaluate(&import, &[0.0], &[0.3], &weights, 1.0) - 0.3).abs() < 1e-12);

    let export = make_plan(vec![-1.0], vec![0.0]);
    assert!((evaluate(&export, &[0.0], &[0.3], &weights, 1.0) - (-0.15)).abs() < 1e-12);
}

#[test]
fn any_violation_outranks_any_feasible_cost() {
    let weights = make_weights();

    // An expensive but feasible day versus a cheap day with a small violation.
    let expensive = make_plan(vec![5.0; 24], vec![0.0; 24]);
    let mut cheap_infeasible = make_plan(vec![-5.0; 24], vec![0.0; 24]);
    cheap_infeasible.violations_kwh[3] = 0.5;

    let feasible_fitness = evaluate(&expensive, &[0.0; 24], &[0.4; 24], &weights, 1.0);
    let infeasible_fitness = evaluate(&cheap_infeasible, &[0.0; 24], &[0.4; 24], &weights, 1.0);

    assert!(infeasible_fitness > feasible_fitness);
}

#[test]
fn smoothness_term_penalizes_chattering_commands() {
    let weights = FitnessWeights {
        smoothness_weight: 0.1,
        ..make_weights()
    };
    let plan = make_plan(vec![0.0; 4], vec![0.0; 4]);
    let prices = vec![0.2; 4];

    let steady = evaluate(&plan, &[0.5, 0.5, 0.5, 0.5], &prices, &weights, 1.0);
    let chattering = evaluate(&plan, &[1.0, -1.0, 1.0, -1.0], &prices, &weights, 1.0);

    assert!(chattering > steady);
}

#[test]
fn non_finite_input_collapses_to_worst_fitness() {
    let weights = make_weights();
    let plan = make_plan(vec![f64::NAN], vec![0.0]);

    let fitness = evaluate(&plan, &[0.0], &[0.3], &weights, 1.0);

    assert_eq!(fitness, f64::INFINITY);
}
