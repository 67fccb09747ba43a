// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Depth Sweep
//
// Lazily runs the trial loop for each depth in an ascending range. One
// increment source is threaded through every depth, so consuming the sweep
// twice does not reproduce the same numbers unless the source is seeded.

use std::iter::FusedIterator;
use std::time::Instant;

use crate::aggregator::{check_trial_args, run_trials_with, ProgressSink};
use crate::error::Result;
use crate::increment::{GaussianSource, IncrementSource};
use crate::types::{DepthReport, SampleSummary, SweepConfig};

/// Iterator over `(depth, statistics)` reports from `min_depth` to `max_depth`.
///
/// Yields one `Err` and then stops if a depth fails; later depths are never
/// computed.
pub struct DepthSweep<S, P = ()> {
    source: S,
    progress: P,
    config: SweepConfig,
    next_depth: i32,
    finished: bool,
}

impl DepthSweep<GaussianSource, ()> {
    /// Sweep drawing from a Gaussian source seeded per `config.seed`.
    pub fn from_config(config: SweepConfig) -> Self {
        let source = GaussianSource::from_seed_option(config.seed);
        Self::new(config, source)
    }
}

impl<S: IncrementSource> DepthSweep<S, ()> {
    pub fn new(config: SweepConfig, source: S) -> Self {
        Self {
            next_depth: config.min_depth,
            finished: config.min_depth > config.max_depth,
            source,
            progress: (),
            config,
        }
    }
}

impl<S, P> DepthSweep<S, P> {
    /// Attach a progress collaborator.
    pub fn with_progress<Q: ProgressSink>(self, progress: Q) -> DepthSweep<S, Q> {
        DepthSweep {
            source: self.source,
            progress,
            config: self.config,
            next_depth: self.next_depth,
            finished: self.finished,
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S, P> DepthSweep<S, P>
where
    S: IncrementSource,
    P: ProgressSink,
{
    fn run_depth(&mut self, depth: i32) -> Result<DepthReport> {
        let trials = self.config.trials_per_depth;
        let samples = self.config.diagnostic_sample_count;
        let checked = check_trial_args(depth, trials, samples)?;
        tracing::debug!(depth = checked, trials, "depth started");
        self.progress.on_depth(checked, trials);

        let start = Instant::now();
        let batch = run_trials_with(
            &mut self.source,
            depth,
            trials,
            samples,
            &mut self.progress,
        )?;
        let elapsed_secs = start.elapsed().as_secs_f64();

        tracing::debug!(depth = checked, elapsed_secs, "depth finished");
        Ok(DepthReport {
            depth: checked,
            statistics: batch.statistics,
            elapsed_secs,
            summary: SampleSummary::from_trials(&batch.maxima, &batch.statistics),
            maxima: batch.maxima,
            samples: batch.samples,
        })
    }
}

impl<S, P> Iterator for DepthSweep<S, P>
where
    S: IncrementSource,
    P: ProgressSink,
{
    type Item = Result<DepthReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let depth = self.next_depth;
        if depth >= self.config.max_depth {
            self.finished = true;
        } else {
            self.next_depth += 1;
        }

        let report = self.run_depth(depth);
        if report.is_err() {
            self.finished = true;
        }
        Some(report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = i64::from(self.config.max_depth) - i64::from(self.next_depth) + 1;
        (0, Some(usize::try_from(remaining).unwrap_or(usize::MAX)))
    }
}

impl<S, P> FusedIterator for DepthSweep<S, P>
where
    S: IncrementSource,
    P: ProgressSink,
{
}

/// Entropy-seeded sweep over `min_depth..=max_depth` without leaf sampling.
pub fn sweep(min_depth: i32, max_depth: i32, trials_per_depth: usize) -> DepthSweep<GaussianSource> {
    DepthSweep::from_config(SweepConfig {
        min_depth,
        max_depth,
        trials_per_depth,
        diagnostic_sample_count: 0,
        seed: None,
    })
}
