//! CLI module for sigcompare
//!
//! - Argument parsing (`args`)
//! - Command handlers (`commands`)
//! - Merging arguments with the config file (`config_builder`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod commands;
pub mod config_builder;
pub mod setup;

pub use args::Cli;
pub use commands::{handle_compare_command, run_comparison};
pub use config_builder::{build_run_config, CompareMode, RunConfig};
pub use setup::{configure_thread_pool, get_worker_count, init_tracing};

use crate::config::load_config;
use crate::hooks::{ShellCommandGenerator, SignatureGenerator};
use anyhow::Result;
use tracing::debug;

/// Run one invocation. `Ok(true)` means every file matched.
pub fn run(cli: &Cli) -> Result<bool> {
    let file_config = load_config(cli.config.as_deref())?;
    let config = build_run_config(cli, &file_config);
    debug!(?config, "resolved run configuration");

    if matches!(config.mode, CompareMode::Directories { .. }) {
        configure_thread_pool(config.jobs);
        debug!(workers = get_worker_count(config.jobs), "thread pool configured");
    }

    let generator = config.generate.as_deref().map(|cmd| ShellCommandGenerator::new(cmd));
    handle_compare_command(
        &config,
        generator.as_ref().map(|g| g as &dyn SignatureGenerator),
    )
}
