//! Random sources for weather generation.
//!
//! The environment never reaches for an ambient global generator. Callers
//! hand it a [`RandomSource`], seeded or scripted, so a run can be replayed
//! exactly.

/// A source of uniformly distributed floats in `[0.0, 1.0)`.
pub trait RandomSource {
    /// Draw the next value in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Create a seeded generator for the environment.
#[must_use]
pub fn seeded(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0.0, 1.0)` on construction. An empty script
/// always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create a scripted source from the given draws.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always yields the same value.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
