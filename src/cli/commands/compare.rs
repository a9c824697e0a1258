//! Compare command handler
//!
//! Runs the optional generator, pairs files, compares them and writes the
//! report.

use crate::cli::config_builder::{CompareMode, RunConfig};
use crate::comparison::{compare_pair, compare_pairs};
use crate::hooks::SignatureGenerator;
use crate::io::{pair_directories, FilePair};
use crate::output::{aggregate, write_report, Report};
use anyhow::{Context, Result};
use tracing::info;

/// Handle the compare command. Returns whether every file matched.
pub fn handle_compare_command(
    config: &RunConfig,
    generator: Option<&dyn SignatureGenerator>,
) -> Result<bool> {
    if let Some(generator) = generator {
        generator.generate()?;
    }

    let report = run_comparison(config)?;
    info!(
        total = report.total,
        failed = report.failed_count,
        "comparison finished"
    );

    write_report(
        &report,
        config.format,
        config.quiet,
        config.formatting,
        config.output.as_deref(),
    )?;
    Ok(report.passed)
}

/// Compare without rendering.
pub fn run_comparison(config: &RunConfig) -> Result<Report> {
    let results = match &config.mode {
        CompareMode::Files {
            original,
            generated,
        } => vec![compare_pair(
            &FilePair::single(original, generated),
            config.options,
        )],
        CompareMode::Directories {
            original,
            generated,
        } => {
            let pairs = pair_directories(original, generated, &config.extensions, &config.exclude)
                .context("failed to collect signature files")?;
            compare_pairs(&pairs, config.options)
        }
    };
    Ok(aggregate(results))
}
