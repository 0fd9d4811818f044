//! Maze environment: state graph and reward model
//!
//! A maze is a directed graph over states `0..n_states` with one designated
//! goal state. Movement is only allowed along edges; rewards are attached to
//! states, not edges, and are paid on *entering* a state.
//!
//! ## Components
//!
//! - [`MazeGraph`]: adjacency structure with a goal marker
//! - [`RewardModel`]: per-state rewards (step cost, goal bonus, trap penalties)
//! - [`reference`]: the built-in twelve-state maze used by the CLI and tests
//!
//! ## Usage Example
//!
//! ```
//! use qmaze::maze::{MazeGraph, RewardModel};
//!
//! // A three-state corridor: 2 -> 1 -> 0 (goal), with return edges.
//! let graph = MazeGraph::from_edges(3, &[(0, 1), (1, 0), (1, 2), (2, 1)], 0)?;
//! let rewards = RewardModel::new(3, -0.1, 0, 10.0, &[], -100.0)?;
//!
//! assert!(graph.has_edge(2, 1));
//! assert_eq!(rewards.reward_of(0), 10.0);
//! # Ok::<(), qmaze::Error>(())
//! ```

pub mod graph;
pub mod reference;
pub mod rewards;

// Public re-exports
pub use graph::{MazeGraph, State};
pub use rewards::RewardModel;
