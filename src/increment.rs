// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Edge Increment Sources
//
// Every edge of every tree consumes one draw. A sweep owns exactly one source
// and threads it through all trials, so the draw sequence is never reset
// between trials or depths.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

// ---------------------------------------------------------------------------
// IncrementSource
// ---------------------------------------------------------------------------

/// Supplier of per-edge increments.
pub trait IncrementSource {
    /// Draw the next increment. Advances the source state exactly once.
    fn next_increment(&mut self) -> f64;
}

impl<S: IncrementSource + ?Sized> IncrementSource for &mut S {
    fn next_increment(&mut self) -> f64 {
        (**self).next_increment()
    }
}

// ---------------------------------------------------------------------------
// GaussianSource
// ---------------------------------------------------------------------------

/// I.i.d. standard-normal increments drawn from a single PRNG stream.
#[derive(Debug, Clone)]
pub struct GaussianSource<R = ChaCha8Rng> {
    rng: R,
    draws: u64,
}

impl GaussianSource<ChaCha8Rng> {
    /// Seed once from OS entropy. Used when no explicit seed is configured.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Deterministic stream for reproducible sweeps and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// `Some(seed)` gives a reproducible stream, `None` an entropy-seeded one.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> GaussianSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of increments drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: Rng> IncrementSource for GaussianSource<R> {
    #[inline]
    fn next_increment(&mut self) -> f64 {
        self.draws += 1;
        self.rng.sample::<f64, _>(StandardNormal)
    }
}

// ---------------------------------------------------------------------------
// ConstantSource
// ---------------------------------------------------------------------------

/// Returns the same value at every draw. Every leaf of a tree walked with it
/// has path sum `depth * value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource {
    value: f64,
    draws: u64,
}

impl ConstantSource {
    pub fn new(value: f64) -> Self {
        Self { value, draws: 0 }
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl IncrementSource for ConstantSource {
    #[inline]
    fn next_increment(&mut self) -> f64 {
        self.draws += 1;
        self.value
    }
}
