//! The built-in twelve-state reference maze
//!
//! One fixed topology is shipped with the crate so the CLI, the tests, and
//! host applications exercise the same environment. The maze is a small
//! corridor grid: the goal sits at state 0, a trap at state 11, and every
//! corridor cell connects to its immediate neighbors in both directions.
//! The trap's self-loop marks it absorbing; the goal keeps real outgoing
//! edges, so exploration may pass through it.
//!
//! ```text
//!     0 --- 1     2 --- 3
//!     |     |     |     |
//!     4     5 --- 6 --- 7
//!     |     |           |
//!     8 --- 9 --- 10    11
//! ```

use crate::{
    Result,
    maze::{MazeGraph, RewardModel, State},
};

/// Number of states in the reference maze
pub const REFERENCE_STATES: usize = 12;

/// Goal state of the reference maze
pub const REFERENCE_GOAL: State = 0;

/// Trap state of the reference maze
pub const REFERENCE_TRAP: State = 11;

/// Directed edges of the reference maze, including the trap's self-loop
pub const REFERENCE_EDGES: [(State, State); 26] = [
    (0, 1),
    (0, 4),
    (1, 0),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 2),
    (3, 7),
    (4, 0),
    (4, 8),
    (5, 1),
    (5, 6),
    (5, 9),
    (6, 2),
    (6, 5),
    (6, 7),
    (7, 3),
    (7, 6),
    (7, 11),
    (8, 4),
    (8, 9),
    (9, 5),
    (9, 8),
    (9, 10),
    (10, 9),
    (11, 11),
];

/// Step cost for ordinary states
pub const REFERENCE_STEP_REWARD: f64 = -0.1;

/// Reward for entering the goal
pub const REFERENCE_GOAL_REWARD: f64 = 10.0;

/// Reward for entering the trap
pub const REFERENCE_TRAP_REWARD: f64 = -100.0;

/// Reference learning rate (α)
pub const REFERENCE_LEARNING_RATE: f64 = 0.1;

/// Reference discount rate (γ)
pub const REFERENCE_DISCOUNT_RATE: f64 = 0.1;

/// Reference episode count
pub const REFERENCE_EPOCHS: usize = 500;

/// Build the reference maze graph
pub fn reference_graph() -> Result<MazeGraph> {
    MazeGraph::from_edges(REFERENCE_STATES, &REFERENCE_EDGES, REFERENCE_GOAL)
}

/// Build the reference reward model
pub fn reference_rewards() -> Result<RewardModel> {
    RewardModel::new(
        REFERENCE_STATES,
        REFERENCE_STEP_REWARD,
        REFERENCE_GOAL,
        REFERENCE_GOAL_REWARD,
        &[REFERENCE_TRAP],
        REFERENCE_TRAP_REWARD,
    )
}
