//! Command handlers for the CLI

mod compare;

pub use compare::{handle_compare_command, run_comparison};
