//! Per-state reward assignment

use serde::{Deserialize, Serialize};

use crate::{Error, Result, maze::State};

/// Immutable mapping from state to scalar reward.
///
/// Exactly one state (the goal) holds the large positive reward. Trap states
/// hold a large negative reward that trips the trainer's abort threshold.
/// Every other state holds the small negative step cost that biases learned
/// policies toward shorter paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    rewards: Vec<f64>,
    traps: Vec<State>,
}

impl RewardModel {
    /// Build a reward model from the step cost, the goal reward, and a trap
    /// set sharing one trap reward.
    ///
    /// # Errors
    ///
    /// Fails if `n_states` is zero, if the goal or any trap is out of range,
    /// or if the goal is listed as a trap.
    pub fn new(
        n_states: usize,
        step_reward: f64,
        goal: State,
        goal_reward: f64,
        traps: &[State],
        trap_reward: f64,
    ) -> Result<Self> {
        if n_states == 0 {
            return Err(Error::EmptyStateSpace);
        }
        if goal >= n_states {
            return Err(Error::StateOutOfBounds {
                state: goal,
                n_states,
            });
        }

        let mut rewards = vec![step_reward; n_states];
        let mut trap_list = Vec::new();
        for &trap in traps {
            if trap >= n_states {
                return Err(Error::StateOutOfBounds {
                    state: trap,
                    n_states,
                });
            }
            if trap == goal {
                return Err(Error::GoalIsTrap { state: trap });
            }
            rewards[trap] = trap_reward;
            trap_list.push(trap);
        }
        rewards[goal] = goal_reward;

        trap_list.sort_unstable();
        trap_list.dedup();

        Ok(Self {
            rewards,
            traps: trap_list,
        })
    }

    /// Number of states covered by the model
    pub fn n_states(&self) -> usize {
        self.rewards.len()
    }

    /// Reward observed on entering `state`
    pub fn reward_of(&self, state: State) -> f64 {
        self.rewards[state]
    }

    /// Trap states, ascending
    pub fn trap_states(&self) -> &[State] {
        &self.traps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewards_are_assigned_per_role() {
        let model = RewardModel::new(4, -0.1, 0, 10.0, &[3], -100.0).unwrap();
        assert!((model.reward_of(0) - 10.0).abs() < 1e-12);
        assert!((model.reward_of(1) + 0.1).abs() < 1e-12);
        assert!((model.reward_of(2) + 0.1).abs() < 1e-12);
        assert!((model.reward_of(3) + 100.0).abs() < 1e-12);
        assert_eq!(model.trap_states(), &[3]);
    }

    #[test]
    fn trap_list_is_sorted_and_deduplicated() {
        let model = RewardModel::new(5, -0.1, 0, 10.0, &[4, 2, 4], -100.0).unwrap();
        assert_eq!(model.trap_states(), &[2, 4]);
    }

    #[test]
    fn out_of_range_trap_is_rejected() {
        let err = RewardModel::new(3, -0.1, 0, 10.0, &[3], -100.0).unwrap_err();
        assert!(matches!(
            err,
            Error::StateOutOfBounds {
                state: 3,
                n_states: 3
            }
        ));
    }

    #[test]
    fn goal_listed_as_trap_is_rejected() {
        let err = RewardModel::new(3, -0.1, 1, 10.0, &[1], -100.0).unwrap_err();
        assert!(matches!(err, Error::GoalIsTrap { state: 1 }));
    }

    #[test]
    fn empty_model_is_rejected() {
        assert!(matches!(
            RewardModel::new(0, -0.1, 0, 10.0, &[], -100.0),
            Err(Error::EmptyStateSpace)
        ));
    }
}
