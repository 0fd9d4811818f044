//! Episode vocabulary: learning phases and terminal outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of a trainer's life cycle
///
/// A trainer starts out exploring and flips to converged exactly once, after
/// the full episode budget has been spent. Greedy walks are only permitted in
/// the converged phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LearningPhase {
    /// Q-values are still being updated
    #[default]
    Exploring,
    /// Training finished; the table is frozen for greedy walks
    Converged,
}

/// Why a training episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// The random walk entered the goal state
    ReachedGoal,
    /// A transition collected a reward below the abort threshold
    TrapAborted,
    /// The walk reached a state with no outgoing edges
    DeadEnd,
    /// The per-episode step cap ran out before any terminal condition
    StepCapped,
}

impl fmt::Display for LearningPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LearningPhase::Exploring => "exploring",
            LearningPhase::Converged => "converged",
        };
        f.write_str(label)
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EpisodeOutcome::ReachedGoal => "reached-goal",
            EpisodeOutcome::TrapAborted => "trap-aborted",
            EpisodeOutcome::DeadEnd => "dead-end",
            EpisodeOutcome::StepCapped => "step-capped",
        };
        f.write_str(label)
    }
}
