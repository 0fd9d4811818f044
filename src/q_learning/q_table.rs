//! Dense Q-value table over maze states

use serde::{Deserialize, Serialize};

use crate::maze::State;

/// Q-table mapping (state, successor) pairs to Q-values
///
/// Stored as a dense row-major `n_states × n_states` matrix: the row index is
/// the current state, the column index the successor. All cells start at zero.
/// Training only ever writes cells that correspond to edges of the maze, but
/// reads are defined for every pair, so non-edge cells simply stay at their
/// initial value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Number of states (rows and columns)
    n_states: usize,
    /// Row-major Q-values: `values[from * n_states + to]`
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized Q-table for `n_states` states
    pub fn new(n_states: usize) -> Self {
        Self {
            n_states,
            values: vec![0.0; n_states * n_states],
        }
    }

    /// Number of states the table covers
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Get the Q-value for a (state, successor) pair
    pub fn value_of(&self, from: State, to: State) -> f64 {
        self.values[from * self.n_states + to]
    }

    /// Set the Q-value for a (state, successor) pair
    pub fn set(&mut self, from: State, to: State, value: f64) {
        self.values[from * self.n_states + to] = value;
    }

    /// Get the full row of Q-values for a state
    pub fn row(&self, from: State) -> &[f64] {
        &self.values[from * self.n_states..(from + 1) * self.n_states]
    }

    /// Get the maximum Q-value over a set of successor states
    ///
    /// Returns 0.0 when `successors` is empty, so terminal and dead-end
    /// states contribute no future value to the update target.
    pub fn max_over(&self, from: State, successors: &[State]) -> f64 {
        if successors.is_empty() {
            return 0.0;
        }
        successors
            .iter()
            .map(|&to| self.value_of(from, to))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select the greedy successor for a state: the full-row argmax
    ///
    /// Every column is considered, not just the state's neighbors. Ties are
    /// broken toward the lowest successor index, so an untrained (all-zero)
    /// row yields successor 0.
    pub fn greedy_successor(&self, from: State) -> State {
        let row = self.row(from);
        let mut best = 0;
        for (to, &q) in row.iter().enumerate() {
            if q > row[best] {
                best = to;
            }
        }
        best
    }

    /// Blended update toward a target value
    ///
    /// `Q[from][to] ← (1 − rate)·Q[from][to] + rate·target`
    pub fn blend(&mut self, from: State, to: State, rate: f64, target: f64) {
        let current = self.value_of(from, to);
        self.set(from, to, (1.0 - rate) * current + rate * target);
    }
}
