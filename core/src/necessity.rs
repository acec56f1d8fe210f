//! Necessity weighting — logistic curve over [0, 100].
//!
//! necessity == 0 returns exactly 0 rather than the curve value (≈0.0067).
//! This discontinuity is kept as observed behaviour.

use crate::{config::EngineConfig, types::Weight};

pub fn necessity_weight(necessity: f64, config: &EngineConfig) -> Weight {
    if necessity == 0.0 {
        return 0.0;
    }
    let exponent = -config.necessity_slope * (necessity - config.necessity_midpoint);
    1.0 / (1.0 + exponent.exp())
}
