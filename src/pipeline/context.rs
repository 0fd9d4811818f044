//! Training context: validated configuration plus run state
//!
//! A [`TrainingContext`] bundles everything one training run needs: the maze,
//! the reward model, the hyperparameters, and the seeded random source. It is
//! constructed through [`ContextBuilder`], which validates the configuration
//! up front so the trainer and walker never have to.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    maze::{MazeGraph, RewardModel, reference},
    q_learning::LearningPhase,
};

/// Default learning rate (α)
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default discount rate (γ)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.1;

/// Default number of training episodes
pub const DEFAULT_MAX_EPOCHS: usize = 500;

/// Default per-episode step cap
///
/// Bounds runaway exploration in degenerate graphs; generous enough that the
/// cap never fires on reasonable mazes.
pub const DEFAULT_STEP_CAP: usize = 10_000;

/// Default abort threshold
///
/// A transition that collects a reward below this value ends the episode.
/// Sits between the usual step cost and the usual trap penalty, so traps
/// truncate episodes and ordinary steps never do.
pub const DEFAULT_ABORT_THRESHOLD: f64 = -50.0;

/// Everything one training run needs, validated and ready to go
///
/// The context owns the pseudo-random source: it is seeded exactly once, at
/// construction, and only the trainer advances it. The context also tracks
/// the [`LearningPhase`] gate that keeps greedy walks from running before
/// training has finished.
#[derive(Debug)]
pub struct TrainingContext {
    pub(crate) graph: MazeGraph,
    pub(crate) rewards: RewardModel,
    pub(crate) learning_rate: f64,
    pub(crate) discount_rate: f64,
    pub(crate) max_epochs: usize,
    pub(crate) step_cap: usize,
    pub(crate) abort_threshold: f64,
    pub(crate) seed: Option<u64>,
    pub(crate) rng: StdRng,
    pub(crate) phase: LearningPhase,
}

impl TrainingContext {
    /// Start building a context for the given maze and rewards
    pub fn builder(graph: MazeGraph, rewards: RewardModel) -> ContextBuilder {
        ContextBuilder::new(graph, rewards)
    }

    /// The maze being learned
    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    /// The reward model driving the updates
    pub fn rewards(&self) -> &RewardModel {
        &self.rewards
    }

    /// Learning rate (α)
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Discount rate (γ)
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Number of training episodes to run
    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    /// Per-episode step cap
    pub fn step_cap(&self) -> usize {
        self.step_cap
    }

    /// Reward threshold below which an episode aborts
    pub fn abort_threshold(&self) -> f64 {
        self.abort_threshold
    }

    /// The seed the random source was created from, if one was given
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Current phase of the context
    pub fn phase(&self) -> LearningPhase {
        self.phase
    }
}

/// Builder for [`TrainingContext`] instances.
///
/// # Examples
///
/// ```
/// use qmaze::pipeline::ContextBuilder;
///
/// // The built-in reference maze with its canonical hyperparameters
/// let context = ContextBuilder::reference()?.seed(1).build()?;
/// assert_eq!(context.max_epochs(), 500);
///
/// // Custom configuration
/// let context = ContextBuilder::reference()?
///     .learning_rate(0.5)
///     .discount_rate(0.9)
///     .max_epochs(2_000)
///     .seed(42)
///     .build()?;
/// assert_eq!(context.discount_rate(), 0.9);
/// # Ok::<(), qmaze::Error>(())
/// ```
#[derive(Debug)]
pub struct ContextBuilder {
    graph: MazeGraph,
    rewards: RewardModel,
    learning_rate: f64,
    discount_rate: f64,
    max_epochs: usize,
    step_cap: usize,
    abort_threshold: f64,
    seed: Option<u64>,
}

impl ContextBuilder {
    /// Create a builder for the given maze and rewards with default
    /// hyperparameters.
    pub fn new(graph: MazeGraph, rewards: RewardModel) -> Self {
        Self {
            graph,
            rewards,
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            max_epochs: DEFAULT_MAX_EPOCHS,
            step_cap: DEFAULT_STEP_CAP,
            abort_threshold: DEFAULT_ABORT_THRESHOLD,
            seed: None,
        }
    }

    /// Create a builder preloaded with the reference maze and rewards.
    ///
    /// The default hyperparameters are the reference ones, so
    /// `ContextBuilder::reference()?.seed(1).build()?` reproduces the
    /// canonical training setup exactly.
    ///
    /// # Errors
    /// Returns an error if the reference fixtures fail to construct.
    pub fn reference() -> Result<Self> {
        Ok(Self::new(
            reference::reference_graph()?,
            reference::reference_rewards()?,
        ))
    }

    /// Set the learning rate (α).
    ///
    /// # Arguments
    /// * `value` - Weight given to new information; must lie in (0, 1]
    pub fn learning_rate(mut self, value: f64) -> Self {
        self.learning_rate = value;
        self
    }

    /// Set the discount rate (γ).
    ///
    /// # Arguments
    /// * `value` - Weight given to future value; must lie in (0, 1]
    pub fn discount_rate(mut self, value: f64) -> Self {
        self.discount_rate = value;
        self
    }

    /// Set the number of training episodes.
    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs;
        self
    }

    /// Set the per-episode step cap.
    pub fn step_cap(mut self, cap: usize) -> Self {
        self.step_cap = cap;
        self
    }

    /// Set the reward threshold below which an episode aborts.
    pub fn abort_threshold(mut self, threshold: f64) -> Self {
        self.abort_threshold = threshold;
        self
    }

    /// Set the random seed for deterministic behavior.
    ///
    /// # Arguments
    /// * `seed` - The seed value for the random number generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the context with the configured parameters.
    ///
    /// # Errors
    /// Returns an error if a rate lies outside (0, 1] or the reward model
    /// does not cover the same states as the maze.
    pub fn build(self) -> Result<TrainingContext> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidLearningRate {
                value: self.learning_rate,
            });
        }
        if !(self.discount_rate > 0.0 && self.discount_rate <= 1.0) {
            return Err(Error::InvalidDiscountRate {
                value: self.discount_rate,
            });
        }
        if self.rewards.n_states() != self.graph.n_states() {
            return Err(Error::RewardDimensionMismatch {
                reward_states: self.rewards.n_states(),
                graph_states: self.graph.n_states(),
            });
        }

        let rng = match self.seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        Ok(TrainingContext {
            graph: self.graph,
            rewards: self.rewards,
            learning_rate: self.learning_rate,
            discount_rate: self.discount_rate,
            max_epochs: self.max_epochs,
            step_cap: self.step_cap,
            abort_threshold: self.abort_threshold,
            seed: self.seed,
            rng,
            phase: LearningPhase::Exploring,
        })
    }
}
