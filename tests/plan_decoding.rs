use chrono::Utc;
use gridplan::config::BatteryConfig;
use gridplan::engine::decode;
use gridplan::forecast::EnvironmentSnapshot;

fn make_snapshot(horizon: usize, initial_soc: f64) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        pv_forecast_kw: vec![0.0; horizon],
        price_per_kwh: vec![0.2; horizon],
        load_forecast_kw: vec![0.0; horizon],
        initial_soc,
        taken_at: Utc::now(),
    }
}

fn make_battery() -> BatteryConfig {
    BatteryConfig {
        capacity_kwh: 4.0,
        max_charge_kw: 1.0,
        max_discharge_kw: 1.0,
        min_soc: 0.0,
        max_soc: 1.0,
    }
}

#[test]
fn decode_produces_exact_trajectory_lengths() {
    let snapshot = make_snapshot(6, 0.5);
    let battery = make_battery();

    let plan = decode(&[0.5, -0.5, 0.0, 1.0, -1.0, 0.25], &snapshot, &battery, 1.0);

    assert_eq!(plan.soc.len(), 7);
    assert_eq!(plan.battery_kw.len(), 6);
    assert_eq!(plan.grid_kw.len(), 6);
    assert_eq!(plan.violations_kwh.len(), 6);
}

#[test]
fn soc_stays_within_bounds_under_sustained_charging() {
    let snapshot = make_snapshot(8, 0.5);
    let battery = make_battery();

    let plan = decode(&[1.0; 8], &snapshot, &battery, 1.0);

    for soc in &plan.soc {
        assert!(
            *soc >= battery.min_soc && *soc <= battery.max_soc,
            "SOC {} escaped bounds",
            soc
        );
    }
    // 0.5 + 8 * 0.25 worth of charging cannot fit; the tail must be clipped.
    assert!(plan.total_violation_kwh() > 0.0);
}

#[test]
fn violation_magnitude_matches_clipped_energy() {
    let snapshot = make_snapshot(1, 1.0);
    let battery = make_battery();

    // Charging a full battery: the whole 1 kWh slot request overshoots.
    let plan = decode(&[1.0], &snapshot, &battery, 1.0);

    assert_eq!(plan.soc, vec![1.0, 1.0]);
    assert!((plan.violations_kwh[0] - 1.0).abs() < 1e-9);
    assert!(plan.battery_kw[0].abs() < 1e-9);
}

#[test]
fn realized_power_is_consistent_with_soc_trace() {
    let snapshot = make_snapshot(5, 0.3);
    let battery = make_battery();
    let slot_hours = 0.25;

    let plan = decode(&[0.8, -0.2, 1.0, -1.0, 0.1], &snapshot, &battery, slot_hours);

    for t in 0..5 {
        let soc_delta = plan.soc[t + 1] - plan.soc[t];
        let implied_kw = soc_delta * battery.capacity_kwh / slot_hours;
        assert!(
            (implied_kw - plan.battery_kw[t]).abs() < 1e-9,
            "slot {}: realized {} kW vs implied {} kW",
            t,
            plan.battery_kw[t],
            implied_kw
        );
    }
}

#[test]
fn grid_trace_accounts_for_pv_load_and_battery() {
    let mut snapshot = make_snapshot(1, 0.5);
    snapshot.pv_forecast_kw = vec![2.0];
    snapshot.load_forecast_kw = vec![0.5];
    let battery = make_battery();

    // Holding: surplus PV is exported.
    let plan = decode(&[0.0], &snapshot, &battery, 1.0);
    assert!((plan.grid_kw[0] - (-1.5)).abs() < 1e-9);

    // Charging at full power eats into the export.
    let plan = decode(&[1.0], &snapshot, &battery, 1.0);
    assert!((plan.grid_kw[0] - (-0.5)).abs() < 1e-9);
}

#[test]
fn commands_outside_domain_are_clamped() {
    let snapshot = make_snapshot(2, 0.5);
    let battery = make_battery();

    let clamped = decode(&[3.0, -7.5], &snapshot, &battery, 1.0);
    let bounded = decode(&[1.0, -1.0], &snapshot, &battery, 1.0);

    assert_eq!(clamped.soc, bounded.soc);
    assert_eq!(clamped.battery_kw, bounded.battery_kw);
}
