//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! The only randomness in a run is the exposure draw, and it flows
//! through a RiskSampler handed to the SimulationDriver. A SimRng
//! seeded with the same value replays the same history.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Source of synthetic high-risk exposures.
pub trait RiskSampler {
    /// Draw an integer risk in [min, max], both ends inclusive.
    /// Callers guarantee min <= max.
    fn draw_risk(&mut self, min: u32, max: u32) -> u32;
}

/// Seeded exposure stream.
pub struct SimRng {
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl RiskSampler for SimRng {
    fn draw_risk(&mut self, min: u32, max: u32) -> u32 {
        assert!(min <= max, "min must be <= max");
        self.inner.gen_range(min..=max)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
/// Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    draws:  Vec<u32>,
    cursor: usize,
}

impl ScriptedSampler {
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Every draw returns the same value.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl RiskSampler for ScriptedSampler {
    fn draw_risk(&mut self, min: u32, max: u32) -> u32 {
        if self.draws.is_empty() {
            return min;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(min, max)
    }
}
