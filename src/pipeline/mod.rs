//! Training and walking pipeline
//!
//! This module provides the control side of the learner:
//! - Building a validated training context
//! - Running training episodes over a maze
//! - Walking the learned greedy policy to the goal
//! - Recording observations along the way

pub mod context;
pub mod observers;
pub mod trainer;
pub mod walker;

pub use context::{
    ContextBuilder, DEFAULT_ABORT_THRESHOLD, DEFAULT_DISCOUNT_RATE, DEFAULT_LEARNING_RATE,
    DEFAULT_MAX_EPOCHS, DEFAULT_STEP_CAP, TrainingContext,
};
// Re-export observer implementations (adapters)
pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
    WalkObservation,
};
pub use trainer::Trainer;
pub use walker::Walker;

pub use crate::ports::Observer;
