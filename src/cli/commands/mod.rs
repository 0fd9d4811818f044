//! Subcommands for the qmaze CLI

pub mod maze;
pub mod train;
