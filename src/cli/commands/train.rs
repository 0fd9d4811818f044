//! Train command - run tabular Q-learning over the reference maze

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{format_number, print_kv, print_stats_table},
    export::QTableCsvExporter,
    maze::State,
    pipeline::{
        ContextBuilder, DEFAULT_ABORT_THRESHOLD, DEFAULT_DISCOUNT_RATE, DEFAULT_LEARNING_RATE,
        DEFAULT_MAX_EPOCHS, DEFAULT_STEP_CAP, JsonlObserver, MetricsObserver, MetricsSummary,
        ProgressObserver, Trainer, Walker,
    },
    q_learning::QTable,
};

#[derive(Debug, Serialize)]
struct WalkSummary {
    start: State,
    path: Vec<State>,
    steps: usize,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    epochs: usize,
    learning_rate: f64,
    discount_rate: f64,
    step_cap: usize,
    abort_threshold: f64,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: MetricsSummary,
    walk: Option<WalkSummary>,
    metadata: SummaryMetadata,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    about = "Train a Q-learning policy on the reference maze",
    allow_negative_numbers = true
)]
pub struct TrainArgs {
    /// Number of training epochs (one episode per epoch)
    #[arg(long, short = 'e', default_value_t = DEFAULT_MAX_EPOCHS)]
    pub epochs: usize,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount rate γ (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE)]
    pub discount_rate: f64,

    /// Maximum simulated transitions per episode
    #[arg(long, default_value_t = DEFAULT_STEP_CAP)]
    pub step_cap: usize,

    /// Abort an episode when a transition reward falls below this value
    #[arg(long, default_value_t = DEFAULT_ABORT_THRESHOLD)]
    pub abort_threshold: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Walk the learned greedy policy from this state after training
    #[arg(long, short = 's')]
    pub start: Option<usize>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Output CSV file for the learned Q-table
    #[arg(long, short = 'O')]
    pub q_table_out: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Print the learned Q-table as a grid
    #[arg(long, default_value_t = false)]
    pub print_q_table: bool,
}

/// Print the learned Q-values as a dense grid, one row per source state
fn display_q_table(table: &QTable) {
    println!("\n=== Learned Q-Table ===");
    print!("{:>5}", "from");
    for to in 0..table.n_states() {
        print!("{to:>9}");
    }
    println!();

    for from in 0..table.n_states() {
        print!("{from:>5}");
        for to in 0..table.n_states() {
            print!("{:>9.3}", table.value_of(from, to));
        }
        println!();
    }
}

/// Render a walk as `9 -> 5 -> 1 -> 0 (goal)`
fn render_path(path: &[State], goal: State) -> String {
    let mut rendered = path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");
    if path.last() == Some(&goal) {
        rendered.push_str(" (goal)");
    }
    rendered
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut builder = ContextBuilder::reference()?
        .learning_rate(args.learning_rate)
        .discount_rate(args.discount_rate)
        .max_epochs(args.epochs)
        .step_cap(args.step_cap)
        .abort_threshold(args.abort_threshold);

    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let mut context = builder.build()?;

    // Reject a bad walk start before any training time is spent.
    if let Some(start) = args.start
        && start >= context.graph().n_states()
    {
        return Err(anyhow!(
            "Walk start {start} is out of bounds for a maze of {} states",
            context.graph().n_states()
        ));
    }

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    println!("=== Q-Learning Training ===");
    print_kv("States", &context.graph().n_states().to_string());
    print_kv("Goal", &context.graph().goal().to_string());
    print_kv("Epochs", &format_number(context.max_epochs()));
    print_kv("Learning rate", &context.learning_rate().to_string());
    print_kv("Discount rate", &context.discount_rate().to_string());
    match context.seed() {
        Some(seed) => print_kv("Seed", &seed.to_string()),
        None => print_kv("Seed", "random"),
    }

    let mut trainer = Trainer::new();

    // Add progress bar observer if requested
    if args.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    // Add metrics observer; the retained clone reads the counts back later
    let metrics_observer = MetricsObserver::new();
    trainer = trainer.with_observer(Box::new(metrics_observer.clone()));

    // Add JSONL observer if requested; the walker reuses the same sink so
    // episode and walk records land in one file
    let jsonl_observer = match &args.observations {
        Some(path) => {
            let observer = JsonlObserver::new(path)?;
            trainer = trainer.with_observer(Box::new(observer.clone()));
            Some(observer)
        }
        None => None,
    };

    let table = trainer.train(&mut context)?;
    let training_summary = metrics_observer.summary();

    println!("\n=== Training Complete ===");
    let episodes = format_number(training_summary.total_episodes);
    let reached_goal = format!(
        "{} ({:.1}%)",
        training_summary.reached_goal,
        training_summary.goal_rate * 100.0
    );
    let trap_aborted = format!(
        "{} ({:.1}%)",
        training_summary.trap_aborted,
        training_summary.trap_rate * 100.0
    );
    let dead_ends = training_summary.dead_end.to_string();
    let step_capped = training_summary.step_capped.to_string();
    let avg_length = format!("{:.1}", training_summary.avg_episode_length);
    print_stats_table(&[
        ("Episodes", episodes.as_str()),
        ("Reached goal", reached_goal.as_str()),
        ("Trap aborted", trap_aborted.as_str()),
        ("Dead ends", dead_ends.as_str()),
        ("Step capped", step_capped.as_str()),
        ("Avg episode length", avg_length.as_str()),
    ]);

    if args.print_q_table {
        display_q_table(&table);
    }

    if let Some(ref csv_path) = args.q_table_out {
        let exported = QTableCsvExporter::export(&table, csv_path)?;
        println!(
            "\n✓ Exported {exported} state row(s) to {}",
            csv_path.display()
        );
    }

    let walk_summary = match args.start {
        Some(start) => {
            let mut walker = Walker::new();
            if let Some(observer) = &jsonl_observer {
                walker = walker.with_observer(Box::new(observer.clone()));
            }

            let path = walker.walk(&context, &table, start)?;
            let steps = path.len().saturating_sub(1);

            println!("\n=== Greedy Walk ===");
            print_kv("Start", &start.to_string());
            print_kv("Path", &render_path(&path, context.graph().goal()));
            print_kv("Steps", &steps.to_string());

            Some(WalkSummary { start, path, steps })
        }
        None => None,
    };

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!(
                "\n⚠️  Normalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: training_summary,
            walk: walk_summary,
            metadata: SummaryMetadata {
                epochs: args.epochs,
                learning_rate: args.learning_rate,
                discount_rate: args.discount_rate,
                step_cap: args.step_cap,
                abort_threshold: args.abort_threshold,
                seed: args.seed,
            },
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
