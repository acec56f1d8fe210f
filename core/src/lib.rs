//! Risk-decision simulator.
//!
//! An event's probability, consequence and uncertainty produce a bounded
//! risk score. Recent exposure to high-risk events damps that score,
//! an independent necessity weight is mixed in, and the result is a
//! single avoid/accept verdict. The simulation driver feeds a growing
//! exposure history back into the verdict to show how repeated risk
//! changes later decisions.

pub mod config;
pub mod decision;
pub mod desensitization;
pub mod error;
pub mod event;
pub mod history;
pub mod necessity;
pub mod observer;
pub mod risk;
pub mod rng;
pub mod simulation;
pub mod types;

pub use config::EngineConfig;
pub use decision::{Decision, DecisionEngine};
pub use error::{SimError, SimResult};
pub use event::{Event, HistoryRecord};
pub use history::History;
pub use simulation::{run_simulation, IterationResult, SimulationDriver, SimulationSummary};

use types::{Risk, Weight};

/// `calculate_risk` with the default configuration.
pub fn calculate_risk(event: &Event) -> Risk {
    risk::calculate_risk(event, &EngineConfig::default())
}

/// `desensitization_factor` with the default configuration.
pub fn desensitization_factor(risk: Risk, history: &[HistoryRecord]) -> Weight {
    desensitization::desensitization_factor(risk, history, &EngineConfig::default())
}

/// `necessity_weight` with the default configuration.
pub fn necessity_weight(necessity: f64) -> Weight {
    necessity::necessity_weight(necessity, &EngineConfig::default())
}

/// `should_avoid` with the default configuration, reporting to `log`.
pub fn should_avoid(event: &Event, history: &[HistoryRecord]) -> bool {
    DecisionEngine::default().should_avoid(event, history)
}
