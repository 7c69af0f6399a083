//! Injectable randomness for the analyzers.
//!
//! The scoring heuristics historically added bounded random jitter to
//! simulate model variability. All of that randomness lives behind
//! [`NoiseSource`] so deterministic callers - and every test - can turn it
//! off without touching the analyzers themselves.

use rand::RngExt;

/// Source of bounded symmetric jitter.
pub trait NoiseSource: Send + Sync {
    /// A value in `[-magnitude, +magnitude]`.
    fn jitter(&self, magnitude: f64) -> f64;
}

/// Zero-magnitude noise: scoring becomes a pure function of its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NoiseSource for Silent {
    fn jitter(&self, _magnitude: f64) -> f64 {
        0.0
    }
}

/// Uniform jitter reproducing the "simulate model variability" behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulated;

impl NoiseSource for Simulated {
    fn jitter(&self, magnitude: f64) -> f64 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(-magnitude..=magnitude)
    }
}
