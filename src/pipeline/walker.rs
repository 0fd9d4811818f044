//! Greedy policy walker

use crate::{
    Error, Result,
    maze::State,
    ports::Observer,
    q_learning::{LearningPhase, QTable},
};

use super::context::TrainingContext;

/// Follows the learned policy from a start state to the goal
///
/// Each hop takes the full-row argmax of the Q-table: every successor column
/// is considered, not just the current state's neighbors, with ties broken
/// toward the lowest index. The walker never advances the context's random
/// source and never modifies the table.
#[derive(Default)]
pub struct Walker {
    observers: Vec<Box<dyn Observer>>,
}

impl Walker {
    /// Create a new walker with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the walker
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Walk greedily from `start` to the goal, returning the visited path
    ///
    /// The returned path begins with `start` and ends with the goal; a walk
    /// that starts at the goal returns the single-element path immediately.
    ///
    /// # Errors
    ///
    /// - [`Error::WalkBeforeConvergence`] if the context has not finished
    ///   training
    /// - [`Error::StateOutOfBounds`] if `start` is not a state of the maze
    /// - [`Error::QTableDimensionMismatch`] if the table was trained on a
    ///   differently sized maze
    /// - [`Error::PolicyDivergence`] if the greedy policy revisits a state;
    ///   the path walked so far travels inside the error for diagnostics
    pub fn walk(
        &mut self,
        context: &TrainingContext,
        table: &QTable,
        start: State,
    ) -> Result<Vec<State>> {
        if context.phase != LearningPhase::Converged {
            return Err(Error::WalkBeforeConvergence);
        }

        let n_states = context.graph.n_states();
        if start >= n_states {
            return Err(Error::StateOutOfBounds {
                state: start,
                n_states,
            });
        }
        if table.n_states() != n_states {
            return Err(Error::QTableDimensionMismatch {
                table_states: table.n_states(),
                graph_states: n_states,
            });
        }

        // Notify observers of walk start
        for observer in &mut self.observers {
            observer.on_walk_start(start)?;
        }

        let mut path = vec![start];
        let mut seen = vec![false; n_states];
        seen[start] = true;

        let mut state = start;
        while state != context.graph.goal() {
            let next = table.greedy_successor(state);
            if seen[next] {
                return Err(Error::PolicyDivergence { state: next, path });
            }
            seen[next] = true;
            path.push(next);

            for observer in &mut self.observers {
                observer.on_state_visited(LearningPhase::Converged, next)?;
            }

            state = next;
        }

        // Notify observers of walk end
        for observer in &mut self.observers {
            observer.on_walk_end(&path)?;
        }

        Ok(path)
    }
}
