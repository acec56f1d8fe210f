//! Two drivers, same seed, same events.
//! They must produce byte-identical results and identical histories.

use desense_core::{simulation::SimulationDriver, Event};

fn sample_events() -> Vec<Event> {
    vec![
        Event::new().with_probability(0.2).with_necessity(60.0),
        Event::new().with_probability(0.6).with_necessity(48.0),
        Event::new().with_probability(0.9).with_uncertainty(0.1),
    ]
}

fn run_json(seed: u64, iterations: u64) -> (String, Vec<f64>) {
    let mut driver = SimulationDriver::seeded(seed).expect("driver");
    let results = driver.run(&sample_events(), iterations).expect("run");
    let risks = driver
        .history()
        .records()
        .iter()
        .map(|r| r.risk_or_zero())
        .collect();
    (serde_json::to_string(&results).expect("serialize"), risks)
}

#[test]
fn same_seed_produces_identical_results() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let (json_a, history_a) = run_json(SEED, 50);
    let (json_b, history_b) = run_json(SEED, 50);

    assert_eq!(history_a, history_b, "Exposure histories diverged");
    assert_eq!(json_a, json_b, "Serialized results diverged");
}

#[test]
fn different_seeds_produce_different_histories() {
    let (_, history_a) = run_json(42, 30);
    let (_, history_b) = run_json(99, 30);

    assert_ne!(
        history_a, history_b,
        "Different seeds produced identical histories — seed is not being used"
    );
}

#[test]
fn seeded_draws_stay_in_exposure_range() {
    let (_, history) = run_json(7, 200);
    assert_eq!(history.len(), 200);
    for risk in history {
        assert!((80.0..=100.0).contains(&risk), "Exposure out of range: {risk}");
        assert_eq!(risk.fract(), 0.0, "Exposure should be an integer draw: {risk}");
    }
}
