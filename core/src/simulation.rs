//! Simulation driver — repeated exposure and re-evaluation.
//!
//! EACH ITERATION (fixed order):
//!   1. Draw one exposure risk in [exposure_risk_min, exposure_risk_max]
//!      and append it to history.
//!   2. Evaluate every input event, in input order, against the
//!      already-updated history.
//!   3. Record the history length and the ordered verdicts.
//!
//! RULES:
//!   - The driver owns its History. Nothing else mutates it.
//!   - All randomness flows through the injected RiskSampler.
//!   - Input is validated before the first draw. A bad event aborts the
//!     run with no partial results and history untouched.

use crate::{
    config::EngineConfig,
    decision::DecisionEngine,
    error::SimResult,
    event::{Event, HistoryRecord},
    history::History,
    observer::DecisionEvent,
    rng::{RiskSampler, SimRng},
    types::Iteration,
};
use serde::{Deserialize, Serialize};

/// Upper bound on the result buffer reserved up front.
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventOutcome {
    pub event:    Event,
    /// True means the event should be avoided.
    pub decision: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IterationResult {
    pub iteration:   Iteration,
    pub history_len: usize,
    pub outcomes:    Vec<EventOutcome>,
}

impl IterationResult {
    pub fn avoided(&self) -> usize {
        self.outcomes.iter().filter(|o| o.decision).count()
    }
}

pub struct SimulationDriver {
    engine:    DecisionEngine,
    sampler:   Box<dyn RiskSampler + Send>,
    history:   History,
    iteration: Iteration,
}

impl SimulationDriver {
    pub fn new(engine: DecisionEngine, sampler: Box<dyn RiskSampler + Send>) -> Self {
        Self {
            engine,
            sampler,
            history:   History::new(),
            iteration: 0,
        }
    }

    /// Driver with a default engine and a seeded exposure stream.
    pub fn seeded(seed: u64) -> SimResult<Self> {
        Self::with_config(EngineConfig::default(), seed)
    }

    pub fn with_config(config: EngineConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::new(
            DecisionEngine::new(config),
            Box::new(SimRng::new(seed)),
        ))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Run `iterations` passes over `events`. Zero iterations returns an
    /// empty vec and leaves history alone. The config and every event are
    /// checked before the first draw.
    pub fn run(&mut self, events: &[Event], iterations: u64) -> SimResult<Vec<IterationResult>> {
        self.engine.config().validate()?;
        for event in events {
            event.validate()?;
        }

        let mut results = Vec::with_capacity(result_capacity(iterations));
        for _ in 0..iterations {
            results.push(self.step(events));
        }
        Ok(results)
    }

    fn step(&mut self, events: &[Event]) -> IterationResult {
        self.iteration += 1;
        let iteration = self.iteration;
        let config = self.engine.config();

        let risk = self
            .sampler
            .draw_risk(config.exposure_risk_min, config.exposure_risk_max);
        self.history.push(HistoryRecord::with_risk(risk as f64));
        self.engine.observe(&DecisionEvent::ExposureRecorded {
            iteration,
            risk,
            history_len: self.history.len(),
        });

        let outcomes: Vec<EventOutcome> = events
            .iter()
            .map(|event| EventOutcome {
                event:    event.clone(),
                decision: self.engine.should_avoid(event, self.history.records()),
            })
            .collect();

        let result = IterationResult {
            iteration,
            history_len: self.history.len(),
            outcomes,
        };

        let avoided = result.avoided();
        self.engine.observe(&DecisionEvent::IterationCompleted {
            iteration,
            history_len: result.history_len,
            avoided,
            accepted: result.outcomes.len() - avoided,
        });
        result
    }
}

fn result_capacity(iterations: u64) -> usize {
    usize::try_from(iterations)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED)
}

/// One-shot run with the default configuration and a seeded exposure stream.
pub fn run_simulation(events: &[Event], iterations: u64, seed: u64) -> SimResult<Vec<IterationResult>> {
    SimulationDriver::seeded(seed)?.run(events, iterations)
}

/// Per-event tally across a whole run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventTally {
    pub event:    Event,
    pub avoided:  usize,
    pub accepted: usize,
    /// First iteration whose verdict differs from the one before it.
    pub first_flip: Option<Iteration>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimulationSummary {
    pub iterations:  usize,
    pub history_len: usize,
    pub tallies:     Vec<EventTally>,
}

impl SimulationSummary {
    /// Expects results from a single run: every iteration carries the
    /// same events in the same order.
    pub fn from_results(results: &[IterationResult]) -> Self {
        let Some(first) = results.first() else {
            return Self::default();
        };

        let tallies = first
            .outcomes
            .iter()
            .enumerate()
            .map(|(idx, outcome)| {
                let mut tally = EventTally {
                    event:      outcome.event.clone(),
                    avoided:    0,
                    accepted:   0,
                    first_flip: None,
                };
                let mut previous: Option<bool> = None;
                for result in results {
                    let Some(o) = result.outcomes.get(idx) else { continue };
                    if o.decision {
                        tally.avoided += 1;
                    } else {
                        tally.accepted += 1;
                    }
                    if tally.first_flip.is_none() && previous.is_some_and(|p| p != o.decision) {
                        tally.first_flip = Some(result.iteration);
                    }
                    previous = Some(o.decision);
                }
                tally
            })
            .collect();

        Self {
            iterations:  results.len(),
            history_len: results.last().map(|r| r.history_len).unwrap_or(0),
            tallies,
        }
    }
}
