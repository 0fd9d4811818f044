//! Directed maze graph over a small discrete state space

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A maze state. Plain index into `[0, n_states)`; identity only.
pub type State = usize;

/// Immutable directed adjacency structure over `n_states` discrete states.
///
/// Edges carry no payload; traversability is the only information. Neighbor
/// lists are kept in ascending order so that action enumeration (and thus
/// tie-breaking) is deterministic everywhere.
///
/// A terminal goal is expressed structurally: its only outgoing edge is its
/// own self-loop. A goal with real outgoing edges is equally valid; episodes
/// may then pass through it during exploration. A goal with no edges at all
/// is rejected as ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGraph {
    n_states: usize,
    goal: State,
    neighbors: Vec<Vec<State>>,
}

impl MazeGraph {
    /// Build a graph from an explicit edge list.
    ///
    /// Duplicate edges collapse to one. Non-goal states with zero outgoing
    /// edges are legal (dead ends terminate episodes early).
    ///
    /// # Errors
    ///
    /// Fails if `n_states` is zero, if the goal or any edge endpoint lies
    /// outside `[0, n_states)`, or if the goal has no outgoing edges.
    pub fn from_edges(n_states: usize, edges: &[(State, State)], goal: State) -> Result<Self> {
        if n_states == 0 {
            return Err(Error::EmptyStateSpace);
        }
        check_state(goal, n_states)?;

        let mut adjacency = vec![false; n_states * n_states];
        for &(from, to) in edges {
            check_state(from, n_states)?;
            check_state(to, n_states)?;
            adjacency[from * n_states + to] = true;
        }

        Self::from_flat_adjacency(n_states, &adjacency, goal)
    }

    /// Build a graph from an N×N adjacency table (`true` = edge).
    ///
    /// # Errors
    ///
    /// Fails on an empty table, a row whose length disagrees with the number
    /// of rows, an out-of-range goal, or a goal with no outgoing edges.
    pub fn from_adjacency(adjacency: &[Vec<bool>], goal: State) -> Result<Self> {
        let n_states = adjacency.len();
        if n_states == 0 {
            return Err(Error::EmptyStateSpace);
        }
        check_state(goal, n_states)?;

        let mut flat = vec![false; n_states * n_states];
        for (row, entries) in adjacency.iter().enumerate() {
            if entries.len() != n_states {
                return Err(Error::RaggedAdjacencyRow {
                    row,
                    expected: n_states,
                    actual: entries.len(),
                });
            }
            flat[row * n_states..(row + 1) * n_states].copy_from_slice(entries);
        }

        Self::from_flat_adjacency(n_states, &flat, goal)
    }

    fn from_flat_adjacency(n_states: usize, adjacency: &[bool], goal: State) -> Result<Self> {
        // Row scan in index order keeps every neighbor list ascending.
        let neighbors: Vec<Vec<State>> = (0..n_states)
            .map(|from| {
                (0..n_states)
                    .filter(|&to| adjacency[from * n_states + to])
                    .collect()
            })
            .collect();

        if neighbors[goal].is_empty() {
            return Err(Error::GoalWithoutEdges { goal });
        }

        Ok(Self {
            n_states,
            goal,
            neighbors,
        })
    }

    /// Number of states in the maze
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The goal state
    pub fn goal(&self) -> State {
        self.goal
    }

    /// Whether `state` is the goal
    pub fn is_goal(&self, state: State) -> bool {
        state == self.goal
    }

    /// States reachable from `state` by one directed edge, ascending.
    ///
    /// Out-of-range states have no neighbors.
    pub fn neighbors(&self, state: State) -> &[State] {
        self.neighbors.get(state).map_or(&[], Vec::as_slice)
    }

    /// Whether the directed edge `from -> to` exists
    pub fn has_edge(&self, from: State, to: State) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}

fn check_state(state: State, n_states: usize) -> Result<()> {
    if state >= n_states {
        return Err(Error::StateOutOfBounds { state, n_states });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> MazeGraph {
        // 0 -> {1, 2} -> 3, goal 3 with a self-loop
        MazeGraph::from_edges(4, &[(0, 2), (0, 1), (1, 3), (2, 3), (3, 3)], 3).unwrap()
    }

    #[test]
    fn neighbors_are_ascending_and_deduplicated() {
        let graph =
            MazeGraph::from_edges(4, &[(0, 2), (0, 1), (0, 2), (1, 3), (2, 3), (3, 3)], 3).unwrap();
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(3), &[3]);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn has_edge_matches_edge_list() {
        let graph = diamond();
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(3, 3));
        assert!(!graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 3));
    }

    #[test]
    fn dead_end_states_are_allowed() {
        let graph = MazeGraph::from_edges(3, &[(0, 1), (0, 2), (2, 2)], 2).unwrap();
        assert!(graph.neighbors(1).is_empty());
    }

    #[test]
    fn empty_state_space_is_rejected() {
        assert!(matches!(
            MazeGraph::from_edges(0, &[], 0),
            Err(Error::EmptyStateSpace)
        ));
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let err = MazeGraph::from_edges(3, &[(0, 3), (2, 2)], 2).unwrap_err();
        assert!(matches!(
            err,
            Error::StateOutOfBounds {
                state: 3,
                n_states: 3
            }
        ));
    }

    #[test]
    fn out_of_range_goal_is_rejected() {
        let err = MazeGraph::from_edges(3, &[(0, 1)], 7).unwrap_err();
        assert!(matches!(err, Error::StateOutOfBounds { state: 7, .. }));
    }

    #[test]
    fn goal_without_edges_is_rejected() {
        let err = MazeGraph::from_edges(3, &[(0, 1), (1, 0)], 2).unwrap_err();
        assert!(matches!(err, Error::GoalWithoutEdges { goal: 2 }));
    }

    #[test]
    fn self_loop_marks_a_terminal_goal() {
        let graph = MazeGraph::from_edges(3, &[(0, 1), (1, 2), (2, 2)], 2).unwrap();
        assert_eq!(graph.neighbors(2), &[2]);
    }

    #[test]
    fn adjacency_table_matches_edge_list() {
        let adjacency = vec![
            vec![false, true, true, false],
            vec![false, false, false, true],
            vec![false, false, false, true],
            vec![false, false, false, true],
        ];
        let from_table = MazeGraph::from_adjacency(&adjacency, 3).unwrap();
        assert_eq!(from_table, diamond());
    }

    #[test]
    fn ragged_adjacency_is_rejected() {
        let adjacency = vec![vec![false, true], vec![true]];
        let err = MazeGraph::from_adjacency(&adjacency, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedAdjacencyRow {
                row: 1,
                expected: 2,
                actual: 1
            }
        ));
    }
}
