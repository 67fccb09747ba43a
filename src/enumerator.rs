// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Leaf Enumeration
//
// Walks the implicit complete binary tree of one trial. Each internal node
// draws two fresh increments, one per child edge. Leaves are visited
// left-child-first, so the i-th leaf reached is the one whose path spells
// `i` in binary (left = 0, right = 1). Only the running maximum survives the
// walk; leaf values are never stored.

use crate::error::{Result, SimError};
use crate::increment::IncrementSource;
use crate::types::LeafSample;

/// Deepest tree whose leaf indices fit in a `u128`.
pub const MAX_DEPTH: u32 = 127;

/// Starting value of a trial maximum. Below every attainable leaf sum.
pub const MAXIMUM_SENTINEL: f64 = f64::NEG_INFINITY;

/// Largest diagnostic sample count accepted per trial.
pub const MAX_SAMPLE_COUNT: usize = 10_000;

/// Convert a caller-supplied depth into a walkable one.
pub fn checked_depth(depth: i32) -> Result<u32> {
    if depth < 0 {
        return Err(SimError::invalid("depth", i64::from(depth), "depth must be non-negative"));
    }
    let depth = depth as u32;
    if depth > MAX_DEPTH {
        return Err(SimError::invalid(
            "depth",
            i64::from(depth),
            "leaf indices above depth 127 do not fit in 128 bits",
        ));
    }
    Ok(depth)
}

/// Reject diagnostic sample counts that would not fit a sensible display.
pub fn checked_sample_count(count: usize) -> Result<usize> {
    if count > MAX_SAMPLE_COUNT {
        return Err(SimError::invalid(
            "diagnostic_sample_count",
            i64::try_from(count).unwrap_or(i64::MAX),
            "at most 10000 leaves can be sampled per depth",
        ));
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// A leaf as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafVisit {
    /// Left-to-right position among the tree's `2^depth` leaves.
    pub index: u128,
    /// Root-to-leaf path sum.
    pub sum: f64,
    /// Trial maximum after folding this leaf in.
    pub running_max: f64,
}

/// Called once per leaf, in ascending index order.
pub trait LeafObserver {
    fn on_leaf(&mut self, visit: LeafVisit);
}

impl LeafObserver for () {
    #[inline]
    fn on_leaf(&mut self, _visit: LeafVisit) {}
}

impl<O: LeafObserver + ?Sized> LeafObserver for &mut O {
    #[inline]
    fn on_leaf(&mut self, visit: LeafVisit) {
        (**self).on_leaf(visit)
    }
}

/// Records evenly spaced leaves of one trial.
///
/// Target indices are `j * 2^depth / count` for `j in 0..count`, ascending.
/// A shallow tree with fewer leaves than requested samples reports every leaf.
#[derive(Debug, Clone)]
pub struct LeafSampler {
    targets: Vec<u128>,
    cursor: usize,
    samples: Vec<LeafSample>,
}

impl LeafSampler {
    pub fn new(depth: u32, count: usize) -> Result<Self> {
        let targets = sample_indices(depth, checked_sample_count(count)?);
        Ok(Self {
            cursor: 0,
            samples: Vec::with_capacity(targets.len()),
            targets,
        })
    }

    pub fn targets(&self) -> &[u128] {
        &self.targets
    }

    pub fn into_samples(self) -> Vec<LeafSample> {
        self.samples
    }
}

impl LeafObserver for LeafSampler {
    fn on_leaf(&mut self, visit: LeafVisit) {
        // Relies on strictly increasing visit order.
        if self.targets.get(self.cursor) == Some(&visit.index) {
            tracing::trace!(index = %visit.index, sum = visit.sum, "leaf sample");
            self.samples.push(LeafSample { index: visit.index, sum: visit.sum });
            self.cursor += 1;
        }
    }
}

/// Evenly spaced leaf indices for a tree of the given depth.
///
/// At most `min(count, 2^depth)` indices, strictly ascending.
pub fn sample_indices(depth: u32, count: usize) -> Vec<u128> {
    let total_leaves = 1u128 << depth;
    let count_wide = (count as u128).min(total_leaves);
    (0..count_wide)
        .map(|j| spaced_index(j, total_leaves, count_wide))
        .collect()
}

/// `j * total / count` without overflowing for `total` up to `2^127`.
fn spaced_index(j: u128, total: u128, count: u128) -> u128 {
    let quotient = total / count;
    let remainder = total % count;
    j * quotient + (j * remainder) / count
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

/// Result of walking one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Maximum root-to-leaf sum.
    pub maximum: f64,
    /// Leaves folded into the maximum. Always `2^depth`.
    pub leaves: u128,
}

/// Maximum leaf sum of one freshly drawn tree of `depth` levels.
pub fn max_leaf_sum<S>(source: &mut S, depth: u32) -> f64
where
    S: IncrementSource + ?Sized,
{
    enumerate_leaves(source, depth, 0.0, &mut ()).maximum
}

/// Walk a tree rooted at `initial_sum`, reporting every leaf to `observer`.
///
/// Uses `O(depth)` stack and draws `2 * (2^depth - 1)` increments. A depth of
/// zero draws nothing and returns `initial_sum`.
pub fn enumerate_leaves<S, O>(
    source: &mut S,
    depth: u32,
    initial_sum: f64,
    observer: &mut O,
) -> TrialOutcome
where
    S: IncrementSource + ?Sized,
    O: LeafObserver + ?Sized,
{
    let mut walk = Walk {
        source,
        observer,
        maximum: MAXIMUM_SENTINEL,
        leaves: 0,
    };
    walk.descend(depth, initial_sum);
    TrialOutcome { maximum: walk.maximum, leaves: walk.leaves }
}

struct Walk<'a, S: ?Sized, O: ?Sized> {
    source: &'a mut S,
    observer: &'a mut O,
    maximum: f64,
    leaves: u128,
}

impl<S, O> Walk<'_, S, O>
where
    S: IncrementSource + ?Sized,
    O: LeafObserver + ?Sized,
{
    fn descend(&mut self, depth: u32, sum: f64) {
        if depth == 0 {
            self.maximum = self.maximum.max(sum);
            self.observer.on_leaf(LeafVisit {
                index: self.leaves,
                sum,
                running_max: self.maximum,
            });
            self.leaves += 1;
            return;
        }
        // Both draws happen before either subtree consumes the stream.
        let left = self.source.next_increment();
        let right = self.source.next_increment();
        self.descend(depth - 1, sum + left);
        self.descend(depth - 1, sum + right);
    }
}
