//! CLI infrastructure for the maze Q-learning toolkit
//!
//! This module provides the command-line interface for training greedy
//! policies over the reference maze and inspecting its topology.

pub mod commands;
pub mod output;
