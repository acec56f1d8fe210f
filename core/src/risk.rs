//! Risk calculator — bounded risk score from raw event attributes.
//!
//!   raw  = probability × consequence × (1 + uncertainty)
//!   risk = min(raw × 100, max_risk), floored at 0
//!
//! Inputs are expected finite; `Event::validate` enforces that at the
//! driver boundary. These functions do not check. A NaN field gives a NaN
//! product, and `f64::min` then returns `max_risk`, so the result stays in
//! range but is meaningless.

use crate::{config::EngineConfig, event::Event, types::Risk};

/// Probability-consequence products are fractions; risk is a percentage.
pub const PERCENT_SCALE: f64 = 100.0;

pub fn calculate_risk(event: &Event, config: &EngineConfig) -> Risk {
    risk_from_parts(
        event.probability_or(config),
        event.consequence_or(config),
        event.uncertainty_or(config),
        config,
    )
}

pub fn risk_from_parts(
    probability: f64,
    consequence: f64,
    uncertainty: f64,
    config: &EngineConfig,
) -> Risk {
    let raw = probability * consequence * (1.0 + uncertainty);
    (raw * PERCENT_SCALE).min(config.max_risk).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_ten() {
        let config = EngineConfig::default();
        let risk = calculate_risk(&Event::new(), &config);
        assert!((risk - 10.0).abs() < 1e-9, "got {risk}");
    }

    #[test]
    fn uncertainty_amplifies() {
        let config = EngineConfig::default();
        let e = Event::new().with_probability(0.2).with_uncertainty(0.5);
        assert!((calculate_risk(&e, &config) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn capped_at_max_risk() {
        let config = EngineConfig::default();
        let e = Event::new().with_probability(0.9).with_consequence(5.0);
        assert_eq!(calculate_risk(&e, &config), 100.0);
    }

    #[test]
    fn negative_inputs_floor_at_zero() {
        let config = EngineConfig::default();
        let e = Event::new().with_probability(-0.5);
        assert_eq!(calculate_risk(&e, &config), 0.0);
    }

    #[test]
    fn nan_input_stays_in_range_and_fails_validation() {
        let config = EngineConfig::default();
        let e = Event::new().with_probability(f64::NAN);
        assert_eq!(calculate_risk(&e, &config), config.max_risk);
        assert!(e.validate().is_err());
    }

    #[test]
    fn ad_hoc_risk_field_is_ignored() {
        let config = EngineConfig::default();
        let e = Event::new().with_risk(99.0);
        assert!((calculate_risk(&e, &config) - 10.0).abs() < 1e-9);
    }
}
