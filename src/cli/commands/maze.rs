//! Maze command - describe the reference maze topology and rewards

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    maze::{MazeGraph, RewardModel, reference},
};

#[derive(Parser, Debug)]
#[command(about = "Describe the reference maze topology and rewards")]
pub struct MazeArgs {
    /// Print the adjacency matrix instead of per-state neighbor lists
    #[arg(long, default_value_t = false)]
    pub matrix: bool,
}

/// Print each state with its outgoing neighbors and role markers
fn display_neighbor_lists(graph: &MazeGraph, rewards: &RewardModel) {
    print_subsection("Neighbors");
    for state in 0..graph.n_states() {
        let neighbors = graph
            .neighbors(state)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let marker = if graph.is_goal(state) {
            " (goal)"
        } else if rewards.trap_states().contains(&state) {
            " (trap)"
        } else {
            ""
        };
        println!("  {state:>2}{marker} -> {neighbors}");
    }
}

/// Print the adjacency structure as a 0/1 grid
fn display_adjacency_matrix(graph: &MazeGraph) {
    print_subsection("Adjacency matrix");
    print!("    ");
    for to in 0..graph.n_states() {
        print!("{to:>3}");
    }
    println!();

    for from in 0..graph.n_states() {
        print!("  {from:>2}");
        for to in 0..graph.n_states() {
            print!("{:>3}", u8::from(graph.has_edge(from, to)));
        }
        println!();
    }
}

pub fn execute(args: MazeArgs) -> Result<()> {
    let graph = reference::reference_graph()?;
    let rewards = reference::reference_rewards()?;

    print_section("Reference Maze");

    println!("\n    0 --- 1     2 --- 3");
    println!("    |     |     |     |");
    println!("    4     5 --- 6 --- 7");
    println!("    |     |           |");
    println!("    8 --- 9 --- 10    11");
    println!();

    print_kv("States", &graph.n_states().to_string());
    print_kv("Directed edges", &graph.edge_count().to_string());
    print_kv("Goal", &graph.goal().to_string());
    let traps = rewards
        .trap_states()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    print_kv("Traps", &traps);

    if args.matrix {
        display_adjacency_matrix(&graph);
    } else {
        display_neighbor_lists(&graph, &rewards);
    }

    print_subsection("Rewards");
    print_kv("Step", &reference::REFERENCE_STEP_REWARD.to_string());
    print_kv("Goal", &reference::REFERENCE_GOAL_REWARD.to_string());
    print_kv("Trap", &reference::REFERENCE_TRAP_REWARD.to_string());

    print_subsection("Training defaults");
    print_kv(
        "Learning rate",
        &reference::REFERENCE_LEARNING_RATE.to_string(),
    );
    print_kv(
        "Discount rate",
        &reference::REFERENCE_DISCOUNT_RATE.to_string(),
    );
    print_kv("Epochs", &reference::REFERENCE_EPOCHS.to_string());

    Ok(())
}
