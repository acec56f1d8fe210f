//! Shared primitive types used across the decision engine.

/// One pass of the simulation loop. Iterations are numbered from 1.
pub type Iteration = u64;

/// A risk score on the engine's [0, max_risk] scale.
pub type Risk = f64;

/// A weight or factor in [0, 1].
pub type Weight = f64;
