// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite
//
// Monte Carlo estimate of E[M_n] and Var(M_n), where M_n is the maximum
// leaf sum of a depth-n binary branching random walk with N(0, 1) edge
// increments. Each trial enumerates all 2^n leaves exhaustively.
//
// Depths beyond roughly 25 to 30 take impractically long per trial. No cap
// is imposed below the 127-level leaf-index limit; callers bound the range.

pub mod error;
pub mod types;
pub mod increment;
pub mod enumerator;
pub mod aggregator;
pub mod sweep;

pub use error::{Result, SimError};
pub use types::*;
pub use increment::{ConstantSource, GaussianSource, IncrementSource};
pub use enumerator::{enumerate_leaves, max_leaf_sum, LeafObserver, LeafSampler, LeafVisit, TrialOutcome, MAX_DEPTH};
pub use aggregator::{run_trials, run_trials_with, MomentAccumulator, ProgressSink, TrialBatch};
pub use sweep::{sweep, DepthSweep};
