//! Random source abstraction used by every draw in the engine

use rand::{Rng, RngCore};

/// Source of uniform rolls in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a scripted sequence of rolls, cycling when exhausted
///
/// Used for deterministic tests and for reproducing a reported build.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl FixedRolls {
    /// Create from a non-empty sequence of rolls
    ///
    /// Values are clamped into `[0, 1)`. An empty sequence behaves as a
    /// single `0.0` roll.
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        let mut rolls: Vec<f64> = rolls
            .into()
            .into_iter()
            .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if rolls.is_empty() {
            rolls.push(0.0);
        }
        Self { rolls, cursor: 0 }
    }

    /// Number of rolls consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedRolls {
    fn next_f64(&mut self) -> f64 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
