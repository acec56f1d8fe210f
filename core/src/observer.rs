//! Observability — structured diagnostic events emitted by the engine.
//!
//! RULE: The engine never formats or prints. It hands a DecisionEvent to
//! its observer and moves on. Which sink receives it, and at what
//! severity, is decided once at process start.

use crate::{
    desensitization::RiskBand,
    types::{Iteration, Risk, Weight},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Every diagnostic the engine can emit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionEvent {
    // ── Fine-grained (trace) ───────────────────────
    RiskComputed {
        probability: f64,
        consequence: f64,
        uncertainty: f64,
        risk:        Risk,
    },
    ExposureRecorded {
        iteration:   Iteration,
        risk:        u32,
        history_len: usize,
    },

    // ── Coarse (info) ──────────────────────────────
    DecisionMade {
        label:           Option<String>,
        risk:            Risk,
        band:            RiskBand,
        exposures:       usize,
        factor:          Weight,
        need:            Weight,
        decision_weight: Weight,
        combined:        Weight,
        avoid:           bool,
    },
    IterationCompleted {
        iteration:   Iteration,
        history_len: usize,
        avoided:     usize,
        accepted:    usize,
    },
}

impl DecisionEvent {
    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RiskComputed { .. }       => "risk_computed",
            Self::ExposureRecorded { .. }   => "exposure_recorded",
            Self::DecisionMade { .. }       => "decision_made",
            Self::IterationCompleted { .. } => "iteration_completed",
        }
    }
}

/// A sink for DecisionEvents.
pub trait DecisionObserver: Send + Sync {
    fn observe(&self, event: &DecisionEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecisionObserver for LogObserver {
    fn observe(&self, event: &DecisionEvent) {
        match event {
            DecisionEvent::RiskComputed { probability, consequence, uncertainty, risk } => {
                log::trace!(
                    "risk: p={probability} c={consequence} u={uncertainty} -> {risk:.4}"
                );
            }
            DecisionEvent::ExposureRecorded { iteration, risk, history_len } => {
                log::trace!("iter={iteration} exposure: risk={risk} history_len={history_len}");
            }
            DecisionEvent::DecisionMade {
                label,
                risk,
                band,
                exposures,
                factor,
                need,
                decision_weight,
                combined,
                avoid,
            } => {
                log::info!(
                    "decision: event={} risk={risk:.2} band={} exposures={exposures} \
                     factor={factor:.4} need={need:.4} weight={decision_weight:.4} \
                     combined={combined:.4} avoid={avoid}",
                    label.as_deref().unwrap_or("-"),
                    band.as_str(),
                );
            }
            DecisionEvent::IterationCompleted { iteration, history_len, avoided, accepted } => {
                log::info!(
                    "iter={iteration} completed: history_len={history_len} \
                     avoided={avoided} accepted={accepted}"
                );
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DecisionObserver for NullObserver {
    fn observe(&self, _event: &DecisionEvent) {}
}

/// Keeps every event in memory. Clones share the same buffer, so a test
/// can keep one handle and give the other to the engine.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<DecisionEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events
            .lock()
            .map(|events| events.iter().filter(|e| e.kind() == kind).count())
            .unwrap_or(0)
    }
}

impl DecisionObserver for RecordingObserver {
    fn observe(&self, event: &DecisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
