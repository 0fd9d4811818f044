//! qmaze CLI - tabular Q-learning over a fixed maze
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning policy over the reference maze
//! - Walking the learned greedy policy from a chosen state
//! - Inspecting the maze topology and reward model

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qmaze")]
#[command(version, about = "Tabular Q-learning maze trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning policy, optionally walking it afterwards
    Train(qmaze::cli::commands::train::TrainArgs),

    /// Describe the reference maze topology and rewards
    Maze(qmaze::cli::commands::maze::MazeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qmaze::cli::commands::train::execute(args),
        Commands::Maze(args) => qmaze::cli::commands::maze::execute(args),
    }
}
