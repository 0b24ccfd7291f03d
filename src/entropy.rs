//! Entropy seam for randomized tools
//!
//! The random-number tool draws through this trait so tests can substitute a
//! deterministic source.

use rand::Rng;

pub trait EntropySource: Send + Sync {
    /// Uniform integer in `[min, max]`, both ends inclusive. Callers must
    /// ensure `min <= max`.
    fn int_in_range(&self, min: i64, max: i64) -> i64;
}

/// Process-wide entropy backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngEntropy;

impl EntropySource for ThreadRngEntropy {
    fn int_in_range(&self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Deterministic source for tests: always yields its value, clamped into the
/// requested range.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub i64);

#[cfg(test)]
impl EntropySource for FixedEntropy {
    fn int_in_range(&self, min: i64, max: i64) -> i64 {
        self.0.clamp(min, max)
    }
}
