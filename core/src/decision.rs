//! Decision engine — combines risk, desensitization and necessity into
//! a single avoid/accept verdict.
//!
//! PIPELINE (fixed order):
//!   1. risk            = calculate_risk(event)
//!   2. factor          = desensitization_factor(risk, history)
//!   3. need            = necessity_weight(event.necessity)
//!   4. decision_weight = (risk / max_risk) × factor
//!   5. combined        = (decision_weight + need) / 2
//!   6. avoid           = combined > decision_threshold   (strict)
//!
//! The decision path has no randomness. Same event, same history,
//! same verdict.

use crate::{
    config::EngineConfig,
    desensitization::{self, Desensitization, RiskBand},
    event::{Event, HistoryRecord},
    necessity::necessity_weight,
    observer::{DecisionEvent, DecisionObserver, LogObserver},
    risk::risk_from_parts,
    types::{Risk, Weight},
};
use serde::{Deserialize, Serialize};

/// Every intermediate value behind one verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub risk:            Risk,
    pub band:            RiskBand,
    pub exposures:       usize,
    pub factor:          Weight,
    pub need:            Weight,
    pub decision_weight: Weight,
    pub combined:        Weight,
    /// True means the event should be avoided.
    pub avoid:           bool,
}

pub struct DecisionEngine {
    config:   EngineConfig,
    observer: Box<dyn DecisionObserver>,
}

impl DecisionEngine {
    /// Engine that reports to the `log` facade.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_observer(config, Box::new(LogObserver))
    }

    pub fn with_observer(config: EngineConfig, observer: Box<dyn DecisionObserver>) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calculate_risk(&self, event: &Event) -> Risk {
        let probability = event.probability_or(&self.config);
        let consequence = event.consequence_or(&self.config);
        let uncertainty = event.uncertainty_or(&self.config);
        let risk = risk_from_parts(probability, consequence, uncertainty, &self.config);

        self.observer.observe(&DecisionEvent::RiskComputed {
            probability,
            consequence,
            uncertainty,
            risk,
        });
        risk
    }

    pub fn desensitize(&self, risk: Risk, history: &[HistoryRecord]) -> Desensitization {
        desensitization::assess(risk, history, &self.config)
    }

    pub fn desensitization_factor(&self, risk: Risk, history: &[HistoryRecord]) -> Weight {
        self.desensitize(risk, history).factor
    }

    pub fn necessity_weight(&self, necessity: f64) -> Weight {
        necessity_weight(necessity, &self.config)
    }

    /// Run the full pipeline and return the breakdown.
    pub fn evaluate(&self, event: &Event, history: &[HistoryRecord]) -> Decision {
        let risk = self.calculate_risk(event);
        let Desensitization { band, exposures, factor } = self.desensitize(risk, history);
        let need = self.necessity_weight(event.necessity_or(&self.config));

        let decision_weight = (risk / self.config.max_risk) * factor;
        let combined = (decision_weight + need) / 2.0;
        let avoid = combined > self.config.decision_threshold;

        self.observer.observe(&DecisionEvent::DecisionMade {
            label: event.label.clone(),
            risk,
            band,
            exposures,
            factor,
            need,
            decision_weight,
            combined,
            avoid,
        });

        Decision {
            risk,
            band,
            exposures,
            factor,
            need,
            decision_weight,
            combined,
            avoid,
        }
    }

    pub fn should_avoid(&self, event: &Event, history: &[HistoryRecord]) -> bool {
        self.evaluate(event, history).avoid
    }

    pub(crate) fn observe(&self, event: &DecisionEvent) {
        self.observer.observe(event);
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NullObserver, RecordingObserver};

    fn engine() -> DecisionEngine {
        DecisionEngine::with_observer(EngineConfig::default(), Box::new(NullObserver))
    }

    #[test]
    fn certain_event_is_not_avoided_because_critical_band_zeroes() {
        let e = Event::new().with_probability(1.0).with_consequence(1.0).with_uncertainty(0.0);
        let d = engine().evaluate(&e, &[]);
        assert_eq!(d.risk, 100.0);
        assert_eq!(d.band, RiskBand::Critical);
        assert_eq!(d.factor, 0.0);
        assert_eq!(d.decision_weight, 0.0);
        assert_eq!(d.need, 0.0);
        assert_eq!(d.combined, 0.0);
        assert!(!d.avoid);
    }

    #[test]
    fn medium_risk_with_full_necessity_is_avoided() {
        let e = Event::new()
            .with_probability(0.5)
            .with_consequence(1.0)
            .with_uncertainty(0.0)
            .with_necessity(100.0);
        let d = engine().evaluate(&e, &[]);
        assert_eq!(d.risk, 50.0);
        assert_eq!(d.factor, 1.0);
        assert!((d.decision_weight - 0.5).abs() < 1e-12);
        assert!((d.combined - 0.7466).abs() < 1e-3, "combined = {}", d.combined);
        assert!(d.avoid);
    }

    #[test]
    fn exactly_threshold_is_accepted() {
        // need = 0.5 at the midpoint; a zero-risk event leaves combined at 0.25.
        // Drop the threshold so combined lands exactly on it.
        let config = EngineConfig {
            decision_threshold: 0.25,
            ..EngineConfig::default()
        };
        let engine = DecisionEngine::with_observer(config, Box::new(NullObserver));
        let e = Event::new().with_probability(0.0).with_necessity(50.0);
        let d = engine.evaluate(&e, &[]);
        assert_eq!(d.combined, 0.25);
        assert!(!d.avoid);
    }

    #[test]
    fn evaluation_emits_risk_and_decision_events() {
        let recorder = RecordingObserver::new();
        let engine =
            DecisionEngine::with_observer(EngineConfig::default(), Box::new(recorder.clone()));
        engine.should_avoid(&Event::new().with_label("lunch"), &[]);
        assert_eq!(recorder.count("risk_computed"), 1);
        assert_eq!(recorder.count("decision_made"), 1);
        match recorder.events().last() {
            Some(DecisionEvent::DecisionMade { label, .. }) => {
                assert_eq!(label.as_deref(), Some("lunch"));
            }
            other => panic!("expected DecisionMade, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_uses_the_same_factor_as_desensitization_factor() {
        let engine = engine();
        let history = vec![HistoryRecord::with_risk(92.0); 23];
        for p in [0.05, 0.25, 0.4, 0.75, 0.97, 0.99] {
            let e = Event::new().with_probability(p);
            let d = engine.evaluate(&e, &history);
            assert_eq!(d.factor, engine.desensitization_factor(d.risk, &history), "p={p}");
        }
    }

    #[test]
    fn decision_is_deterministic_for_fixed_history() {
        let engine = engine();
        let history = vec![HistoryRecord::with_risk(85.0); 7];
        let e = Event::new().with_probability(0.6).with_necessity(70.0);
        let first = engine.evaluate(&e, &history);
        for _ in 0..10 {
            assert_eq!(engine.evaluate(&e, &history), first);
        }
    }
}
