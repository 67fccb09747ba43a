// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Branching Random Walk Simulation Suite - Errors

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the trial and sweep drivers.
///
/// Every failure aborts the unit of work it occurs in (trial, depth or sweep)
/// and propagates to the caller. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: i64, reason: &'static str) -> Self {
        SimError::InvalidArgument { name, value, reason }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
