//! Episode-based Q-learning trainer

use rand::Rng;

use crate::{
    Result,
    ports::Observer,
    q_learning::{EpisodeOutcome, LearningPhase, QTable},
};

use super::context::TrainingContext;

/// Runs the configured number of training episodes over a maze
///
/// Each episode is a random walk from a uniformly drawn start state; every
/// transition applies the blended Q-update. The trainer is the only consumer
/// of the context's random source, and it flips the context to
/// [`LearningPhase::Converged`] once the full episode budget has been spent.
#[derive(Default)]
pub struct Trainer {
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    /// Create a new trainer with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run all training episodes and return the learned Q-table
    ///
    /// # Errors
    ///
    /// Only observer failures surface as errors. Degenerate episodes (dead
    /// ends, trap hits) are expected and simply end the episode early.
    pub fn train(&mut self, context: &mut TrainingContext) -> Result<QTable> {
        let mut table = QTable::new(context.graph.n_states());

        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(context.max_epochs)?;
        }

        for epoch in 0..context.max_epochs {
            let outcome = self.run_episode(context, &mut table, epoch)?;

            // Notify observers of episode end
            for observer in &mut self.observers {
                observer.on_episode_end(epoch, outcome)?;
            }
        }

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        context.phase = LearningPhase::Converged;

        Ok(table)
    }

    fn run_episode(
        &mut self,
        context: &mut TrainingContext,
        table: &mut QTable,
        epoch: usize,
    ) -> Result<EpisodeOutcome> {
        let start = context.rng.random_range(0..context.graph.n_states());

        // Notify observers of episode start
        for observer in &mut self.observers {
            observer.on_episode_start(epoch, start)?;
        }

        let mut state = start;
        let mut steps = 0;

        // An episode always attempts at least one transition, even when the
        // start is already the goal. Termination is checked after the update,
        // with the step cap last so a goal hit on the final step still counts.
        loop {
            let neighbors = context.graph.neighbors(state);
            if neighbors.is_empty() {
                return Ok(EpisodeOutcome::DeadEnd);
            }

            let next = neighbors[context.rng.random_range(0..neighbors.len())];
            let reward = context.rewards.reward_of(next);

            // Future value is read before the write so a self-loop update
            // sees the pre-update cell.
            let max_next_q = table.max_over(next, context.graph.neighbors(next));
            table.blend(
                state,
                next,
                context.learning_rate,
                reward + context.discount_rate * max_next_q,
            );
            steps += 1;

            for observer in &mut self.observers {
                observer.on_state_visited(LearningPhase::Exploring, next)?;
            }

            if next == context.graph.goal() {
                return Ok(EpisodeOutcome::ReachedGoal);
            }
            if reward < context.abort_threshold {
                return Ok(EpisodeOutcome::TrapAborted);
            }
            if steps >= context.step_cap {
                return Ok(EpisodeOutcome::StepCapped);
            }

            state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ContextBuilder;

    #[test]
    fn test_training_populates_table() {
        let mut context = ContextBuilder::reference()
            .unwrap()
            .seed(42)
            .build()
            .unwrap();

        let table = Trainer::new().train(&mut context).unwrap();

        assert_eq!(context.phase(), LearningPhase::Converged);
        let nonzero = (0..table.n_states())
            .flat_map(|from| table.row(from).to_vec())
            .filter(|&q| q != 0.0)
            .count();
        assert!(nonzero > 0, "training should write at least one Q-value");
    }

    #[test]
    fn test_training_stays_inside_edges() {
        let mut context = ContextBuilder::reference()
            .unwrap()
            .seed(7)
            .build()
            .unwrap();

        let table = Trainer::new().train(&mut context).unwrap();

        for from in 0..table.n_states() {
            for (to, &q) in table.row(from).iter().enumerate() {
                if q != 0.0 {
                    assert!(
                        context.graph().has_edge(from, to),
                        "Q[{from}][{to}] = {q} written for a non-edge"
                    );
                }
            }
        }
    }
}
