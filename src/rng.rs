//! Random Source
//!
//! The engine draws every random decision (spawn city, move direction)
//! through one injected capability, so a seeded generator makes whole runs
//! reproducible and tests can script the outcomes exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::SimError;

/// Uniform-random-integer capability used by the engine.
pub trait RandomSource {
    /// Returns a uniform value in `[0, n)`. Fails when `n` is zero; callers
    /// guarantee a non-empty range before drawing.
    fn pick(&mut self, n: usize) -> Result<usize, SimError>;
}

/// Seeded random number generator, created once per process and injected
/// into the engine.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(SmallRng::from_entropy())
    }
}

impl RandomSource for SimRng {
    fn pick(&mut self, n: usize) -> Result<usize, SimError> {
        if n == 0 {
            return Err(SimError::RandomOutOfBounds);
        }
        Ok(self.0.gen_range(0..n))
    }
}

/// Scripted source for tests: replays a fixed sequence, then repeats its
/// last value.
#[derive(Debug)]
pub struct ScriptedRng {
    values: Vec<usize>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// A source that always answers zero.
    pub fn zeroes() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRng {
    fn pick(&mut self, n: usize) -> Result<usize, SimError> {
        if n == 0 {
            return Err(SimError::RandomOutOfBounds);
        }
        let value = self
            .values
            .get(self.next)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(0);
        self.next += 1;
        Ok(value.min(n - 1))
    }
}
