//! Tabular Q-learning primitives
//!
//! This module holds the data side of the learner: the dense Q-table and the
//! small vocabulary types that describe a training run. The control side
//! (episode loop, greedy walk) lives in [`crate::pipeline`].
//!
//! ## Update Rule
//!
//! Training applies the blended Q-learning update on every transition:
//!
//! ```text
//! Q[s][s'] ← (1 − α)·Q[s][s'] + α·(r[s'] + γ·max_n Q[s'][n])
//! ```
//!
//! where the max runs over the successors of `s'` and collapses to zero when
//! `s'` has none. The blend form is algebraically the classic TD update, kept
//! in this shape so results are reproducible bit for bit across runs with the
//! same seed.
//!
//! ## Usage Example
//!
//! ```
//! use qmaze::q_learning::QTable;
//!
//! let mut table = QTable::new(4);
//! table.set(0, 1, 0.5);
//! table.set(0, 2, 1.5);
//!
//! assert_eq!(table.greedy_successor(0), 2);
//! assert_eq!(table.max_over(0, &[1, 2]), 1.5);
//! ```

pub mod episode;
pub mod q_table;

// Public re-exports
pub use episode::{EpisodeOutcome, LearningPhase};
pub use q_table::QTable;
