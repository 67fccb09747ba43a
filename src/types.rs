// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

use crate::enumerator::{checked_sample_count, MAX_DEPTH};
use crate::error::{Result, SimError};

// ─── Sweep Configuration ────────────────────────────────────────────────────

/// Tunable options of a depth sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SweepConfig {
    pub min_depth: i32,
    pub max_depth: i32,
    pub trials_per_depth: usize,
    /// Leaves reported from the first trial of each depth. Zero disables sampling.
    pub diagnostic_sample_count: usize,
    /// Fixed PRNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_depth: 2,
            max_depth: 100,
            trials_per_depth: 100,
            diagnostic_sample_count: 10,
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Check every option before any trial runs.
    ///
    /// The sweep itself only fails when it reaches an offending depth; this
    /// lets callers reject a bad configuration without drawing anything.
    pub fn validate(&self) -> Result<()> {
        if self.min_depth < 0 {
            return Err(SimError::invalid(
                "min_depth",
                i64::from(self.min_depth),
                "depth must be non-negative",
            ));
        }
        if self.max_depth > MAX_DEPTH as i32 {
            return Err(SimError::invalid(
                "max_depth",
                i64::from(self.max_depth),
                "leaf indices above depth 127 do not fit in 128 bits",
            ));
        }
        if self.min_depth > self.max_depth {
            return Err(SimError::invalid(
                "max_depth",
                i64::from(self.max_depth),
                "max_depth must not be below min_depth",
            ));
        }
        if self.trials_per_depth == 0 {
            return Err(SimError::invalid(
                "trials_per_depth",
                0,
                "at least one trial per depth is required",
            ));
        }
        checked_sample_count(self.diagnostic_sample_count)?;
        Ok(())
    }

    /// Number of depths the sweep will visit.
    pub fn depth_count(&self) -> usize {
        let span = i64::from(self.max_depth) - i64::from(self.min_depth) + 1;
        usize::try_from(span.max(0)).unwrap_or(usize::MAX)
    }
}

// ─── Depth Statistics ───────────────────────────────────────────────────────

/// First two moments of the per-trial maxima at one depth.
///
/// `variance` is the population estimator `E[M²] - E[M]²`. It can come out a
/// few ulps below zero when the true variance is near zero; it is reported
/// unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthStatistics {
    pub mean: f64,
    pub variance: f64,
}

impl DepthStatistics {
    /// Variance clamped at zero, for display.
    pub fn display_variance(&self) -> f64 {
        self.variance.max(0.0)
    }
}

// ─── Leaf Samples ───────────────────────────────────────────────────────────

/// One diagnostic leaf: its left-to-right index and path sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafSample {
    pub index: u128,
    pub sum: f64,
}

// ─── Sample Summary ─────────────────────────────────────────────────────────

/// Spread of a depth's trial maxima, derived from its `DepthStatistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    /// Bessel-corrected standard deviation, `sqrt(variance * n / (n - 1))`.
    pub sample_std_dev: f64,
    /// 95% normal-approximation interval for E[M_n].
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl SampleSummary {
    pub fn from_trials(maxima: &[f64], statistics: &DepthStatistics) -> Self {
        let n = maxima.len();
        let (min, max) = maxima
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &m| (lo.min(m), hi.max(m)));
        if n < 2 {
            let point = if n == 1 { statistics.mean } else { 0.0 };
            return Self {
                n,
                min: if n == 1 { min } else { 0.0 },
                max: if n == 1 { max } else { 0.0 },
                sample_std_dev: 0.0,
                ci_lower: point,
                ci_upper: point,
            };
        }
        let scale = n as f64 / (n - 1) as f64;
        let sample_std_dev = (statistics.display_variance() * scale).sqrt();
        let half_width = 1.96 * sample_std_dev / (n as f64).sqrt();
        Self {
            n,
            min,
            max,
            sample_std_dev,
            ci_lower: statistics.mean - half_width,
            ci_upper: statistics.mean + half_width,
        }
    }
}

// ─── Depth Report ───────────────────────────────────────────────────────────

/// Everything the sweep produces for one depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthReport {
    pub depth: u32,
    pub statistics: DepthStatistics,
    /// Wall-clock seconds spent in this depth's trial loop.
    pub elapsed_secs: f64,
    /// Per-trial maxima in trial order.
    pub maxima: Vec<f64>,
    pub summary: SampleSummary,
    /// Leaves sampled from the first trial, ascending by index.
    pub samples: Vec<LeafSample>,
}
