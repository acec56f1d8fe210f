//! Desensitization — damping factor from risk band and exposure count.
//!
//! Bands are evaluated in this order, and the comparisons are exact:
//!   risk <  low_band_upper       → Low:      min(low_max, low_base + step × n)
//!   risk >= critical_band_lower  → Critical: 0.0
//!   otherwise                    → Medium:   1.0 − min(medium_max_reduction, step × n)
//!
//! where n is the number of history records with risk >= high_risk_threshold.

use crate::{
    config::EngineConfig,
    event::HistoryRecord,
    history::count_high_risk,
    types::{Risk, Weight},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    Critical,
}

impl RiskBand {
    pub fn classify(risk: Risk, config: &EngineConfig) -> Self {
        if risk < config.low_band_upper {
            Self::Low
        } else if risk >= config.critical_band_lower {
            Self::Critical
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low      => "low",
            Self::Medium   => "medium",
            Self::Critical => "critical",
        }
    }
}

/// Factor for a band given `exposures` high-risk records.
pub fn band_factor(band: RiskBand, exposures: usize, config: &EngineConfig) -> Weight {
    let exposure = exposures as f64 * config.per_exposure_step;
    match band {
        RiskBand::Low      => config.low_max_factor.min(config.low_base_factor + exposure),
        RiskBand::Critical => 0.0,
        RiskBand::Medium   => 1.0 - config.medium_max_reduction.min(exposure),
    }
}

/// Band, exposure count and factor for one risk against one history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Desensitization {
    pub band:      RiskBand,
    pub exposures: usize,
    pub factor:    Weight,
}

pub fn assess(risk: Risk, history: &[HistoryRecord], config: &EngineConfig) -> Desensitization {
    let band = RiskBand::classify(risk, config);
    let exposures = count_high_risk(history, config.high_risk_threshold);
    Desensitization {
        band,
        exposures,
        factor: band_factor(band, exposures, config),
    }
}

pub fn desensitization_factor(
    risk: Risk,
    history: &[HistoryRecord],
    config: &EngineConfig,
) -> Weight {
    assess(risk, history, config).factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exposures(n: usize) -> Vec<HistoryRecord> {
        vec![HistoryRecord::with_risk(90.0); n]
    }

    #[test]
    fn band_boundaries_are_exact() {
        let config = EngineConfig::default();
        assert_eq!(RiskBand::classify(29.999, &config), RiskBand::Low);
        assert_eq!(RiskBand::classify(30.0, &config), RiskBand::Medium);
        assert_eq!(RiskBand::classify(97.999, &config), RiskBand::Medium);
        assert_eq!(RiskBand::classify(98.0, &config), RiskBand::Critical);
    }

    #[test]
    fn low_band_saturates_at_point_eight() {
        let config = EngineConfig::default();
        let f0 = desensitization_factor(10.0, &[], &config);
        let f10 = desensitization_factor(10.0, &exposures(10), &config);
        let f40 = desensitization_factor(10.0, &exposures(40), &config);
        assert!((f0 - 0.65).abs() < 1e-9);
        assert!((f10 - 0.75).abs() < 1e-9);
        assert!((f40 - 0.8).abs() < 1e-9);
    }

    #[test]
    fn medium_band_floors_at_point_six_five() {
        let config = EngineConfig::default();
        assert_eq!(desensitization_factor(50.0, &[], &config), 1.0);
        let f20 = desensitization_factor(50.0, &exposures(20), &config);
        let f100 = desensitization_factor(50.0, &exposures(100), &config);
        assert!((f20 - 0.8).abs() < 1e-9);
        assert!((f100 - 0.65).abs() < 1e-9);
    }

    #[test]
    fn assess_reports_band_and_exposures() {
        let config = EngineConfig::default();
        let d = assess(45.0, &exposures(12), &config);
        assert_eq!(d.band, RiskBand::Medium);
        assert_eq!(d.exposures, 12);
        assert!((d.factor - 0.88).abs() < 1e-9);
        assert_eq!(d.factor, desensitization_factor(45.0, &exposures(12), &config));
    }

    #[test]
    fn records_below_threshold_do_not_count() {
        let config = EngineConfig::default();
        let history = vec![HistoryRecord::with_risk(79.9); 10];
        assert_eq!(desensitization_factor(50.0, &history, &config), 1.0);
    }
}
