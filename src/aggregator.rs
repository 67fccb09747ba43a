// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Trial Aggregation
//
// Runs N independent trees at a fixed depth and accumulates the first two
// moments of their maxima.

use crate::enumerator::{checked_depth, checked_sample_count, enumerate_leaves, max_leaf_sum, LeafSampler};
use crate::error::{Result, SimError};
use crate::increment::IncrementSource;
use crate::types::{DepthStatistics, LeafSample};

// ─── Moment Accumulator ─────────────────────────────────────────────────────

/// Running sum and sum-of-squares of trial maxima.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MomentAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl MomentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean and population variance `sum_sq / n - mean²`.
    pub fn statistics(&self) -> Result<DepthStatistics> {
        if self.count == 0 {
            return Err(SimError::invalid("trials", 0, "at least one trial is required"));
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        let mean_sq = self.sum_sq / n;
        Ok(DepthStatistics { mean, variance: mean_sq - mean * mean })
    }
}

// ─── Progress ───────────────────────────────────────────────────────────────

/// Receives trial progress for one depth.
pub trait ProgressSink {
    /// A depth's trial loop is about to start.
    fn on_depth(&mut self, _depth: u32, _trials: usize) {}

    fn on_trials(&mut self, completed: usize, total: usize);
}

impl ProgressSink for () {
    #[inline]
    fn on_trials(&mut self, _completed: usize, _total: usize) {}
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn on_depth(&mut self, depth: u32, trials: usize) {
        (**self).on_depth(depth, trials)
    }

    fn on_trials(&mut self, completed: usize, total: usize) {
        (**self).on_trials(completed, total)
    }
}

/// Trials between progress reports: about a hundred reports per depth at most.
pub fn progress_stride(total: usize) -> usize {
    total / 100 + 1
}

// ─── Trial Runner ───────────────────────────────────────────────────────────

/// Output of one depth's trial loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch {
    pub statistics: DepthStatistics,
    /// Per-trial maxima in trial order.
    pub maxima: Vec<f64>,
    /// Leaves sampled from trial 0.
    pub samples: Vec<LeafSample>,
}

/// Validate one depth's trial arguments, returning the walkable depth.
pub fn check_trial_args(depth: i32, num_trials: usize, sample_count: usize) -> Result<u32> {
    let depth = checked_depth(depth)?;
    if num_trials == 0 {
        return Err(SimError::invalid("trials", 0, "at least one trial is required"));
    }
    checked_sample_count(sample_count)?;
    Ok(depth)
}

/// Mean and variance of the maximum leaf sum over `num_trials` trees.
pub fn run_trials<S>(source: &mut S, depth: i32, num_trials: usize) -> Result<DepthStatistics>
where
    S: IncrementSource + ?Sized,
{
    Ok(run_trials_with(source, depth, num_trials, 0, &mut ())?.statistics)
}

/// Trial loop with leaf sampling on the first trial and progress reporting.
///
/// Arguments are checked before any increment is drawn.
pub fn run_trials_with<S, P>(
    source: &mut S,
    depth: i32,
    num_trials: usize,
    sample_count: usize,
    progress: &mut P,
) -> Result<TrialBatch>
where
    S: IncrementSource + ?Sized,
    P: ProgressSink + ?Sized,
{
    let depth = check_trial_args(depth, num_trials, sample_count)?;

    let stride = progress_stride(num_trials);
    let mut moments = MomentAccumulator::new();
    let mut maxima = Vec::with_capacity(num_trials);
    let mut samples = Vec::new();

    for trial in 0..num_trials {
        let maximum = if trial == 0 && sample_count > 0 {
            let mut sampler = LeafSampler::new(depth, sample_count)?;
            let outcome = enumerate_leaves(source, depth, 0.0, &mut sampler);
            samples = sampler.into_samples();
            outcome.maximum
        } else {
            max_leaf_sum(source, depth)
        };
        maxima.push(maximum);
        moments.push(maximum);

        if trial % stride == 0 {
            progress.on_trials(trial + 1, num_trials);
        }
    }
    progress.on_trials(num_trials, num_trials);

    let statistics = moments.statistics()?;
    tracing::debug!(depth, trials = num_trials, mean = statistics.mean, variance = statistics.variance, "trials complete");
    Ok(TrialBatch { statistics, maxima, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::increment::{ConstantSource, GaussianSource};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[derive(Default)]
    struct Ticks(Vec<(usize, usize)>);

    impl ProgressSink for Ticks {
        fn on_trials(&mut self, completed: usize, total: usize) {
            self.0.push((completed, total));
        }
    }

    #[test]
    fn test_moments_population_variance() {
        let mut acc = MomentAccumulator::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            acc.push(x);
        }
        let stats = acc.statistics().expect("test: non-empty");
        assert_relative_eq!(stats.mean, 5.0);
        // Population variance, not n-1.
        assert_relative_eq!(stats.variance, 4.0);
        assert_eq!(acc.count(), 8);
    }

    #[test]
    fn test_moments_negative_variance_not_clamped() {
        let mut acc = MomentAccumulator::new();
        for _ in 0..3 {
            acc.push(0.1);
        }
        let stats = acc.statistics().expect("test: non-empty");
        assert!(stats.variance < 0.0, "variance {}", stats.variance);
        assert_abs_diff_eq!(stats.variance, 0.0, epsilon = f64::EPSILON);
        assert_eq!(stats.display_variance(), 0.0);
    }

    #[test]
    fn test_oversized_sample_count_rejected_before_draws() {
        let mut source = ConstantSource::new(0.0);
        let err = run_trials_with(&mut source, 2, 1, usize::MAX, &mut ())
            .expect_err("test: oversized sample count");
        assert!(matches!(err, SimError::InvalidArgument { name: "diagnostic_sample_count", .. }));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_sample_count_above_leaf_count() {
        let mut source = ConstantSource::new(1.0);
        let batch = run_trials_with(&mut source, 2, 1, 1000, &mut ()).expect("test: valid");
        let indices: Vec<u128> = batch.samples.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_moments_empty_is_invalid() {
        assert!(matches!(
            MomentAccumulator::new().statistics(),
            Err(SimError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let mut source = ConstantSource::new(1.0);
        let err = run_trials(&mut source, 4, 0).expect_err("test: zero trials");
        assert!(matches!(err, SimError::InvalidArgument { name: "trials", .. }));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_negative_depth_rejected() {
        let mut source = ConstantSource::new(1.0);
        let err = run_trials(&mut source, -1, 10).expect_err("test: negative depth");
        assert!(matches!(err, SimError::InvalidArgument { name: "depth", value: -1, .. }));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_constant_trials_have_zero_variance() {
        let mut source = ConstantSource::new(0.3);
        let stats = run_trials(&mut source, 2, 6).expect("test: valid");
        assert_relative_eq!(stats.mean, 0.6, epsilon = 1e-12);
        // Cancellation leaves a residue below zero; it is reported as is.
        assert!(stats.variance < 0.0);
        assert_abs_diff_eq!(stats.variance, 0.0, epsilon = f64::EPSILON);
    }

    #[test]
    fn test_depth_zero_trials() {
        let mut source = GaussianSource::seeded(1);
        let stats = run_trials(&mut source, 0, 10).expect("test: valid");
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_batch_keeps_trial_order_and_draw_budget() {
        let mut source = GaussianSource::seeded(17);
        let batch = run_trials_with(&mut source, 5, 40, 0, &mut ()).expect("test: valid");
        assert_eq!(batch.maxima.len(), 40);
        assert_eq!(source.draws(), 40 * 2 * ((1 << 5) - 1));

        let mut replay = GaussianSource::seeded(17);
        let replayed: Vec<f64> = (0..40).map(|_| max_leaf_sum(&mut replay, 5)).collect();
        assert_eq!(batch.maxima, replayed);

        let mean = replayed.iter().sum::<f64>() / 40.0;
        assert_relative_eq!(batch.statistics.mean, mean, max_relative = 1e-12);
    }

    #[test]
    fn test_samples_taken_from_first_trial_only() {
        let mut source = GaussianSource::seeded(23);
        let batch = run_trials_with(&mut source, 6, 5, 10, &mut ()).expect("test: valid");
        assert_eq!(batch.samples.len(), 10);
        assert!(batch.samples.iter().all(|s| s.sum <= batch.maxima[0]));

        let mut plain = GaussianSource::seeded(23);
        let stats = run_trials(&mut plain, 6, 5).expect("test: valid");
        assert_eq!(stats, batch.statistics);
    }

    #[test]
    fn test_progress_cadence() {
        let mut source = ConstantSource::new(0.0);
        let mut ticks = Ticks::default();
        run_trials_with(&mut source, 1, 250, 0, &mut ticks).expect("test: valid");

        // Stride 3 over 250 trials: trials 0, 3, ..., 249, then completion.
        assert_eq!(progress_stride(250), 3);
        assert_eq!(ticks.0.first(), Some(&(1, 250)));
        assert_eq!(ticks.0.last(), Some(&(250, 250)));
        assert_eq!(ticks.0.len(), 84 + 1);
        assert!(ticks.0.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_mean_grows_with_depth() {
        let mut source = GaussianSource::seeded(31);
        let shallow = run_trials(&mut source, 2, 400).expect("test: valid");
        let deep = run_trials(&mut source, 8, 400).expect("test: valid");
        assert!(deep.mean > shallow.mean);
        assert!(shallow.variance > 0.0);
    }
}
