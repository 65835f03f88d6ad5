//! Caller-side run loops over the superstep engine
//!
//! The engine performs exactly one round per call. These helpers are the
//! halting policy a caller would otherwise write by hand: keep stepping until
//! a condition holds, or for a fixed number of rounds.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::engine::{StepReport, SuperstepEngine};
use super::error::PregelError;

/// When a run loop stops calling `step`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltCondition {
    /// A round in which no vertex emitted a message
    #[default]
    NoMessages,
    /// A round (after round 0) in which no vertex value changed
    ///
    /// Use for algorithms that never stop messaging, such as PageRank.
    StableValues,
}

impl HaltCondition {
    /// Check whether `report` satisfies the condition
    pub fn is_met(&self, report: &StepReport) -> bool {
        match self {
            HaltCondition::NoMessages => report.is_quiescent(),
            HaltCondition::StableValues => report.superstep > 0 && report.values_changed == 0,
        }
    }
}

/// Result of a run loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of supersteps executed by this run
    pub supersteps: usize,
    /// Messages emitted across all executed supersteps
    pub messages_sent: usize,
    /// Whether the halt condition was reached
    pub halted: bool,
}

/// Step until `condition` holds, executing at most `max_supersteps` rounds.
///
/// Returns `MaxSuperstepsExceeded` if the cap is reached first, and
/// `ConfigError` for a zero cap.
pub fn run_until(
    engine: &mut SuperstepEngine,
    condition: HaltCondition,
    max_supersteps: usize,
) -> Result<RunSummary, PregelError> {
    if max_supersteps == 0 {
        return Err(PregelError::config_error("max_supersteps must be at least 1"));
    }

    let mut summary = RunSummary::default();

    while summary.supersteps < max_supersteps {
        let report = engine.step();
        summary.supersteps += 1;
        summary.messages_sent += report.messages_sent;

        if condition.is_met(&report) {
            summary.halted = true;
            info!(
                algorithm = engine.computation().name(),
                supersteps = summary.supersteps,
                messages = summary.messages_sent,
                ?condition,
                "Run halted"
            );
            return Ok(summary);
        }
    }

    Err(PregelError::MaxSuperstepsExceeded(max_supersteps))
}

/// Step until quiescent using the engine's configured superstep cap
pub fn run_to_quiescence(engine: &mut SuperstepEngine) -> Result<RunSummary, PregelError> {
    let max = engine.config().max_supersteps;
    run_until(engine, HaltCondition::NoMessages, max)
}

/// Execute exactly `rounds` supersteps
pub fn run_rounds(engine: &mut SuperstepEngine, rounds: usize) -> RunSummary {
    let mut summary = RunSummary::default();
    for _ in 0..rounds {
        summary.messages_sent += engine.step().messages_sent;
        summary.supersteps += 1;
    }
    summary
}
