//! Tabular Q-learning over a fixed maze graph
//!
//! This crate provides:
//! - A directed maze environment with per-state rewards and a goal marker
//! - A tabular Q-learning trainer with pluggable observers
//! - A greedy policy walker with cycle detection
//! - CSV export and JSONL observation recording for offline analysis

pub mod cli;
pub mod error;
pub mod export;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use maze::{MazeGraph, RewardModel, State};
pub use pipeline::{ContextBuilder, Trainer, TrainingContext, Walker};
pub use ports::Observer;
pub use q_learning::{EpisodeOutcome, LearningPhase, QTable};
