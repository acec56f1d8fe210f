//! Engine configuration — every numeric constant the decision pipeline reads.
//!
//! RULE: No module hardcodes a threshold. Everything flows through an
//! EngineConfig handed to the engine at construction. The struct is
//! never mutated after that point.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Upper bound of the risk scale.
    pub max_risk: f64,
    /// Reference threshold kept from earlier tuning. Not read by
    /// any decision path.
    pub risk_threshold: f64,

    // ── Event field defaults ──────────────────────
    pub default_probability: f64,
    pub default_consequence: f64,
    pub default_uncertainty: f64,
    pub default_necessity:   f64,

    // ── Desensitization ───────────────────────────
    /// History records at or above this risk count as exposures.
    pub high_risk_threshold:  f64,
    /// Risk strictly below this is the low band.
    pub low_band_upper:       f64,
    /// Risk at or above this is the critical band.
    pub critical_band_lower:  f64,
    pub low_base_factor:      f64,
    pub low_max_factor:       f64,
    pub per_exposure_step:    f64,
    pub medium_max_reduction: f64,

    // ── Necessity curve ───────────────────────────
    pub necessity_midpoint: f64,
    pub necessity_slope:    f64,

    // ── Decision ──────────────────────────────────
    /// Combined weight must be strictly greater than this to avoid.
    pub decision_threshold: f64,

    // ── Synthetic exposure draws (inclusive) ──────
    pub exposure_risk_min: u32,
    pub exposure_risk_max: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_risk:       100.0,
            risk_threshold: 98.635137,

            default_probability: 0.1,
            default_consequence: 1.0,
            default_uncertainty: 0.0,
            default_necessity:   0.0,

            high_risk_threshold:  80.0,
            low_band_upper:       30.0,
            critical_band_lower:  98.0,
            low_base_factor:      0.65,
            low_max_factor:       0.8,
            per_exposure_step:    0.01,
            medium_max_reduction: 0.35,

            necessity_midpoint: 50.0,
            necessity_slope:    0.1,

            decision_threshold: 0.5,

            exposure_risk_min: 80,
            exposure_risk_max: 100,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the pipeline cannot evaluate meaningfully.
    pub fn validate(&self) -> SimResult<()> {
        let reals = [
            ("max_risk", self.max_risk),
            ("risk_threshold", self.risk_threshold),
            ("default_probability", self.default_probability),
            ("default_consequence", self.default_consequence),
            ("default_uncertainty", self.default_uncertainty),
            ("default_necessity", self.default_necessity),
            ("high_risk_threshold", self.high_risk_threshold),
            ("low_band_upper", self.low_band_upper),
            ("critical_band_lower", self.critical_band_lower),
            ("low_base_factor", self.low_base_factor),
            ("low_max_factor", self.low_max_factor),
            ("per_exposure_step", self.per_exposure_step),
            ("medium_max_reduction", self.medium_max_reduction),
            ("necessity_midpoint", self.necessity_midpoint),
            ("necessity_slope", self.necessity_slope),
            ("decision_threshold", self.decision_threshold),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(SimError::invalid(field, format!("must be finite, got {value}")));
            }
        }

        if self.max_risk <= 0.0 {
            return Err(SimError::invalid("max_risk", "must be positive"));
        }
        if self.low_band_upper > self.critical_band_lower {
            return Err(SimError::invalid(
                "low_band_upper",
                format!(
                    "{} exceeds critical_band_lower {}",
                    self.low_band_upper, self.critical_band_lower
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.low_max_factor)
            || !(0.0..=1.0).contains(&self.low_base_factor)
            || !(0.0..=1.0).contains(&self.medium_max_reduction)
        {
            return Err(SimError::invalid(
                "desensitization",
                "band factors must lie in [0, 1]",
            ));
        }
        if self.exposure_risk_min > self.exposure_risk_max {
            return Err(SimError::invalid(
                "exposure_risk_min",
                format!(
                    "{} exceeds exposure_risk_max {}",
                    self.exposure_risk_min, self.exposure_risk_max
                ),
            ));
        }
        Ok(())
    }
}
