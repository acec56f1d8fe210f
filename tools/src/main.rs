//! desense-runner: headless runner for the risk-decision simulator.
//!
//! Usage:
//!   desense-runner --seed 12345 --iterations 10
//!   desense-runner --seed 12345 --iterations 25 --json
//!   desense-runner --seed 12345 --iterations 5 --trace-json

use anyhow::Result;
use desense_core::{
    observer::RecordingObserver, rng::SimRng, DecisionEngine, EngineConfig, Event,
    IterationResult, SimulationDriver, SimulationSummary,
};
use std::env;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    seed:       u64,
    iterations: u64,
    results:    &'a [IterationResult],
    summary:    SimulationSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let iterations = parse_arg(&args, "--iterations", 10u64);
    let json_mode = args.iter().any(|a| a == "--json");
    let trace_mode = args.iter().any(|a| a == "--trace-json");

    let events = sample_events();
    log::debug!("runner: seed={seed} iterations={iterations} events={}", events.len());

    if trace_mode {
        return print_trace(&events, seed, iterations);
    }

    let mut driver = SimulationDriver::seeded(seed)?;
    let results = driver.run(&events, iterations)?;
    let summary = SimulationSummary::from_results(&results);

    if json_mode {
        let report = JsonReport {
            seed,
            iterations,
            results: &results,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_results(&results);
        print_summary(seed, &summary);
    }

    Ok(())
}

fn sample_events() -> Vec<Event> {
    vec![
        Event::new().with_risk(10.0).with_necessity(0.0),
        Event::new().with_risk(10.0).with_necessity(95.0),
        Event::new().with_risk(85.0).with_necessity(0.0),
        Event::new().with_risk(99.0).with_necessity(95.0),
        Event::new().with_risk(25.0).with_necessity(85.0),
    ]
}

/// Dump every DecisionEvent of the run as a JSON array.
fn print_trace(events: &[Event], seed: u64, iterations: u64) -> Result<()> {
    let recorder = RecordingObserver::new();
    let mut driver = SimulationDriver::new(
        DecisionEngine::with_observer(EngineConfig::default(), Box::new(recorder.clone())),
        Box::new(SimRng::new(seed)),
    );
    driver.run(events, iterations)?;
    println!("{}", serde_json::to_string_pretty(&recorder.events())?);
    Ok(())
}

fn print_results(results: &[IterationResult]) {
    for result in results {
        println!("History Length: {}", result.history_len);
        for outcome in &result.outcomes {
            println!("  Event: {}, Should Avoid: {}", outcome.event, outcome.decision);
        }
    }
}

fn print_summary(seed: u64, summary: &SimulationSummary) {
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  seed:         {seed}");
    println!("  iterations:   {}", summary.iterations);
    println!("  history len:  {}", summary.history_len);
    for tally in &summary.tallies {
        let flip = tally
            .first_flip
            .map(|i| format!("flipped at iteration {i}"))
            .unwrap_or_else(|| "stable".to_string());
        println!(
            "  {} | avoided: {} | accepted: {} | {flip}",
            tally.event, tally.avoided, tally.accepted
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
