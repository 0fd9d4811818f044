//! Observer port - abstraction for training and walk observation
//!
//! This port defines the interface for observing trainer and walker events,
//! allowing composable data collection without coupling the algorithms to
//! specific output formats or metrics.

use crate::{
    Result,
    maze::State,
    q_learning::{EpisodeOutcome, LearningPhase},
};

/// Observer trait for monitoring training and greedy walks
///
/// Observers can be composed to collect different types of data during a run.
/// Examples include:
/// - Progress bars for user feedback
/// - JSONL export for analysis
/// - Metrics tracking for evaluation
/// - Per-step visualization hooks for host renderers
///
/// # Design Philosophy
///
/// This trait represents a **port** in hexagonal architecture - a boundary
/// between the learning algorithms and external observation mechanisms.
/// Different observation strategies are **adapters** that implement this port.
/// Observers never influence the algorithms: the learned Q-table is identical
/// with or without them.
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_epochs)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(epoch, start)`
///    - `on_state_visited(Exploring, state)` - Once per simulated step
///    - `on_episode_end(epoch, outcome)`
/// 3. `on_training_end()` - Once at the end of training
/// 4. For each greedy walk (after training):
///    - `on_walk_start(start)`
///    - `on_state_visited(Converged, state)` - Once per greedy step
///    - `on_walk_end(path)`
///
/// # Examples
///
/// ```no_run
/// use qmaze::{
///     ports::Observer,
///     q_learning::EpisodeOutcome,
/// };
///
/// struct CustomObserver {
///     episode_count: usize,
/// }
///
/// impl Observer for CustomObserver {
///     fn on_episode_end(
///         &mut self,
///         _epoch: usize,
///         _outcome: EpisodeOutcome,
///     ) -> qmaze::Result<()> {
///         self.episode_count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// This is the first method called in the observation lifecycle.
    ///
    /// # Parameters
    ///
    /// * `total_epochs` - Total number of episodes that will be run
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a training episode starts.
    ///
    /// # Parameters
    ///
    /// * `epoch` - Index of the episode (0-based)
    /// * `start` - Randomly drawn start state of the episode
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to reset per-episode state.
    fn on_episode_start(&mut self, _epoch: usize, _start: State) -> Result<()> {
        Ok(())
    }

    /// Called once per simulated step with the state just entered.
    ///
    /// Fires during training (after every exploratory transition) and during
    /// greedy walks (after every greedy hop). The phase distinguishes the two.
    /// This is the hook a host renderer uses to highlight visited states.
    ///
    /// # Parameters
    ///
    /// * `phase` - `Exploring` during training, `Converged` during walks
    /// * `state` - The state that was just entered
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to observe individual steps.
    fn on_state_visited(&mut self, _phase: LearningPhase, _state: State) -> Result<()> {
        Ok(())
    }

    /// Called when a training episode ends.
    ///
    /// # Parameters
    ///
    /// * `epoch` - Index of the completed episode
    /// * `outcome` - Why the episode stopped
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record episode outcomes.
    fn on_episode_end(&mut self, _epoch: usize, _outcome: EpisodeOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// This is the last training method called in the observation lifecycle.
    /// Use this to finalize outputs, close files, or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to perform cleanup or final reporting.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when a greedy walk starts.
    ///
    /// # Parameters
    ///
    /// * `start` - The state the walk begins from
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize per-walk state.
    fn on_walk_start(&mut self, _start: State) -> Result<()> {
        Ok(())
    }

    /// Called when a greedy walk completes successfully.
    ///
    /// Not called when the walk aborts with a divergence error; the partial
    /// path travels inside the error instead.
    ///
    /// # Parameters
    ///
    /// * `path` - The full path, starting state included
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record walk results.
    fn on_walk_end(&mut self, _path: &[State]) -> Result<()> {
        Ok(())
    }
}
