//! Input model — the events the engine evaluates and the records it remembers.
//!
//! Every numeric field is optional. Readers go through the accessor
//! methods, which fall back to the EngineConfig defaults when a field
//! is absent. The engine never mutates an Event it evaluates.

use crate::{
    config::EngineConfig,
    error::{SimError, SimResult},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label:       Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub necessity:   Option<f64>,
    /// Only meaningful when the event itself is a historical record.
    /// The risk calculator ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk:        Option<f64>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn with_consequence(mut self, consequence: f64) -> Self {
        self.consequence = Some(consequence);
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = Some(uncertainty);
        self
    }

    pub fn with_necessity(mut self, necessity: f64) -> Self {
        self.necessity = Some(necessity);
        self
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Parse a JSON object. Absent fields default; wrong-typed fields
    /// are invalid input.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let event: Event = serde_json::from_str(json)
            .map_err(|e| SimError::invalid("event", e.to_string()))?;
        event.validate()?;
        Ok(event)
    }

    pub fn probability_or(&self, config: &EngineConfig) -> f64 {
        self.probability.unwrap_or(config.default_probability)
    }

    pub fn consequence_or(&self, config: &EngineConfig) -> f64 {
        self.consequence.unwrap_or(config.default_consequence)
    }

    pub fn uncertainty_or(&self, config: &EngineConfig) -> f64 {
        self.uncertainty.unwrap_or(config.default_uncertainty)
    }

    pub fn necessity_or(&self, config: &EngineConfig) -> f64 {
        self.necessity.unwrap_or(config.default_necessity)
    }

    /// Every present numeric field must be finite.
    pub fn validate(&self) -> SimResult<()> {
        let fields = [
            ("probability", self.probability),
            ("consequence", self.consequence),
            ("uncertainty", self.uncertainty),
            ("necessity", self.necessity),
            ("risk", self.risk),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(SimError::invalid(field, format!("must be finite, got {v}")));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("probability", self.probability),
            ("consequence", self.consequence),
            ("uncertainty", self.uncertainty),
            ("risk", self.risk),
            ("necessity", self.necessity),
        ];
        write!(f, "{{")?;
        let mut first = true;
        if let Some(label) = &self.label {
            write!(f, "label: {label}")?;
            first = false;
        }
        for (name, value) in fields {
            if let Some(v) = value {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{name}: {v}")?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}

/// One remembered exposure. Absent risk reads as 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    #[serde(default)]
    pub risk: Option<f64>,
}

impl HistoryRecord {
    pub fn with_risk(risk: f64) -> Self {
        Self { risk: Some(risk) }
    }

    pub fn risk_or_zero(&self) -> f64 {
        self.risk.unwrap_or(0.0)
    }
}
