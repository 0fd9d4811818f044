//! Observer adapters for the trainer and walker
//!
//! Observers allow composable data collection during a run without coupling
//! the trainer or walker to specific output formats. The metrics and JSONL
//! observers are cloneable handles over shared state, so one instance can be
//! registered with the trainer, another clone with the walker, and the host
//! keeps a third to read results back afterwards.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    maze::State,
    ports::Observer,
    q_learning::{EpisodeOutcome, LearningPhase},
};

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Observation of a single training episode, written as one JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    /// Episode number
    pub epoch: usize,
    /// Randomly drawn start state
    pub start: State,
    /// States entered during the episode, in order
    pub visited: Vec<State>,
    /// Number of transitions taken
    pub total_steps: usize,
    /// Why the episode stopped
    pub outcome: String,
}

/// Observation of a completed greedy walk, written as one JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkObservation {
    /// State the walk began from
    pub start: State,
    /// Full path, start included
    pub path: Vec<State>,
    /// Number of greedy hops
    pub total_steps: usize,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    traps: usize,
    dead_ends: usize,
    capped: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            traps: 0,
            dead_ends: 0,
            capped: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "{} T:{} D:{} C:{}",
            self.goals, self.traps, self.dead_ends, self.capped
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_epochs: usize) -> Result<()> {
        let pb = ProgressBar::new(total_epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs (G:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, epoch: usize, outcome: EpisodeOutcome) -> Result<()> {
        match outcome {
            EpisodeOutcome::ReachedGoal => self.goals += 1,
            EpisodeOutcome::TrapAborted => self.traps += 1,
            EpisodeOutcome::DeadEnd => self.dead_ends += 1,
            EpisodeOutcome::StepCapped => self.capped += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(epoch as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MetricsCounts {
    total_episodes: usize,
    reached_goal: usize,
    trap_aborted: usize,
    dead_end: usize,
    step_capped: usize,
    step_counts: Vec<usize>,
}

/// Metrics observer - Tracks episode statistics
///
/// Cloning yields a handle to the same underlying counts: hand one clone to
/// the trainer and keep another to call [`summary`](MetricsObserver::summary)
/// once training is done.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    counts: Arc<Mutex<MetricsCounts>>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of the collected metrics
    pub fn summary(&self) -> MetricsSummary {
        let counts = lock(&self.counts);
        let total = counts.total_episodes;
        let goal_rate = if total == 0 {
            0.0
        } else {
            counts.reached_goal as f64 / total as f64
        };
        let trap_rate = if total == 0 {
            0.0
        } else {
            counts.trap_aborted as f64 / total as f64
        };
        let avg_episode_length = if counts.step_counts.is_empty() {
            0.0
        } else {
            counts.step_counts.iter().sum::<usize>() as f64 / counts.step_counts.len() as f64
        };

        MetricsSummary {
            total_episodes: total,
            reached_goal: counts.reached_goal,
            trap_aborted: counts.trap_aborted,
            dead_end: counts.dead_end,
            step_capped: counts.step_capped,
            goal_rate,
            trap_rate,
            avg_episode_length,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub reached_goal: usize,
    pub trap_aborted: usize,
    pub dead_end: usize,
    pub step_capped: usize,
    pub goal_rate: f64,
    pub trap_rate: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _epoch: usize, _start: State) -> Result<()> {
        lock(&self.counts).step_counts.push(0);
        Ok(())
    }

    fn on_state_visited(&mut self, phase: LearningPhase, _state: State) -> Result<()> {
        if phase == LearningPhase::Exploring {
            if let Some(last) = lock(&self.counts).step_counts.last_mut() {
                *last += 1;
            }
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _epoch: usize, outcome: EpisodeOutcome) -> Result<()> {
        let mut counts = lock(&self.counts);
        counts.total_episodes += 1;
        match outcome {
            EpisodeOutcome::ReachedGoal => counts.reached_goal += 1,
            EpisodeOutcome::TrapAborted => counts.trap_aborted += 1,
            EpisodeOutcome::DeadEnd => counts.dead_end += 1,
            EpisodeOutcome::StepCapped => counts.step_capped += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Exports observations to JSON Lines format
///
/// Writes one line per training episode and one line per completed walk.
/// Cloning yields a handle to the same underlying file, so the trainer and
/// the walker can share a single output.
#[derive(Clone)]
pub struct JsonlObserver {
    writer: Arc<Mutex<BufWriter<File>>>,
    current_epoch: usize,
    current_start: State,
    visited: Vec<State>,
    walk_start: State,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
            current_epoch: 0,
            current_start: 0,
            visited: Vec::new(),
            walk_start: 0,
        })
    }

    fn write_line<T: Serialize>(&self, record: &T) -> Result<()> {
        let mut writer = lock(&self.writer);
        serde_json::to_writer(&mut *writer, record)?;
        writeln!(&mut *writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, epoch: usize, start: State) -> Result<()> {
        self.current_epoch = epoch;
        self.current_start = start;
        self.visited.clear();
        Ok(())
    }

    fn on_state_visited(&mut self, phase: LearningPhase, state: State) -> Result<()> {
        // Walk steps arrive whole in on_walk_end; only episode steps are
        // accumulated here.
        if phase == LearningPhase::Exploring {
            self.visited.push(state);
        }
        Ok(())
    }

    fn on_episode_end(&mut self, epoch: usize, outcome: EpisodeOutcome) -> Result<()> {
        let observation = EpisodeObservation {
            epoch,
            start: self.current_start,
            total_steps: self.visited.len(),
            visited: self.visited.clone(),
            outcome: outcome.to_string(),
        };
        self.write_line(&observation)
    }

    fn on_walk_start(&mut self, start: State) -> Result<()> {
        self.walk_start = start;
        Ok(())
    }

    fn on_walk_end(&mut self, path: &[State]) -> Result<()> {
        let observation = WalkObservation {
            start: self.walk_start,
            path: path.to_vec(),
            total_steps: path.len().saturating_sub(1),
        };
        self.write_line(&observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();

        assert_eq!(observer.summary().goal_rate, 0.0);

        // Simulate 3 episodes of 2, 1, and 3 steps
        observer.on_episode_start(0, 5).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 1).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 0).unwrap();
        observer.on_episode_end(0, EpisodeOutcome::ReachedGoal).unwrap();

        observer.on_episode_start(1, 7).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 11).unwrap();
        observer.on_episode_end(1, EpisodeOutcome::TrapAborted).unwrap();

        observer.on_episode_start(2, 9).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 8).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 4).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 0).unwrap();
        observer.on_episode_end(2, EpisodeOutcome::ReachedGoal).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_episodes, 3);
        assert_eq!(summary.reached_goal, 2);
        assert_eq!(summary.trap_aborted, 1);
        assert!((summary.goal_rate - 0.666).abs() < 0.01);
        assert!((summary.avg_episode_length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_metrics_clones_share_counts() {
        let observer = MetricsObserver::new();
        let mut handle = observer.clone();

        handle.on_episode_start(0, 3).unwrap();
        handle.on_episode_end(0, EpisodeOutcome::DeadEnd).unwrap();

        assert_eq!(observer.summary().dead_end, 1);
    }

    #[test]
    fn test_metrics_ignores_walk_steps() {
        let mut observer = MetricsObserver::new();

        observer.on_episode_start(0, 2).unwrap();
        observer.on_state_visited(LearningPhase::Exploring, 1).unwrap();
        observer.on_state_visited(LearningPhase::Converged, 0).unwrap();
        observer.on_episode_end(0, EpisodeOutcome::ReachedGoal).unwrap();

        assert!((observer.summary().avg_episode_length - 1.0).abs() < 1e-12);
    }
}
