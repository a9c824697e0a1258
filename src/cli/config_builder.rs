//! Configuration builder for the compare command
//!
//! Merges command-line arguments with the optional config file into one
//! typed run configuration. Flags win over file values.

use crate::cli::args::Cli;
use crate::comparison::CompareOptions;
use crate::config::SigCompareConfig;
use crate::formatting::{ColorMode, FormattingConfig};
use crate::output::OutputFormat;
use std::path::PathBuf;

/// What is being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareMode {
    Files { original: PathBuf, generated: PathBuf },
    Directories { original: PathBuf, generated: PathBuf },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: CompareMode,
    pub options: CompareOptions,
    /// Empty means the walker's defaults.
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub format: OutputFormat,
    pub quiet: bool,
    pub formatting: FormattingConfig,
    pub output: Option<PathBuf>,
    pub generate: Option<String>,
    pub jobs: usize,
}

/// Pure merge of arguments and file configuration.
pub fn build_run_config(cli: &Cli, config: &SigCompareConfig) -> RunConfig {
    let mode = if cli.dir {
        CompareMode::Directories {
            original: cli.original.clone(),
            generated: cli.generated.clone(),
        }
    } else {
        CompareMode::Files {
            original: cli.original.clone(),
            generated: cli.generated.clone(),
        }
    };

    let options = CompareOptions {
        strict_param_names: cli.strict_param_names || config.strict_param_names.unwrap_or(false),
        normalize_unions: cli.normalize_unions || config.normalize_unions.unwrap_or(false),
    };

    RunConfig {
        mode,
        options,
        extensions: prefer_cli(&cli.extensions, &config.extensions),
        exclude: prefer_cli(&cli.exclude, &config.exclude),
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        quiet: cli.quiet || config.quiet.unwrap_or(false),
        formatting: formatting_config(cli, config),
        output: cli.output.clone(),
        generate: cli.generate.clone(),
        jobs: cli.jobs,
    }
}

fn prefer_cli(cli: &[String], config: &Option<Vec<String>>) -> Vec<String> {
    if cli.is_empty() {
        config.clone().unwrap_or_default()
    } else {
        cli.to_vec()
    }
}

fn formatting_config(cli: &Cli, config: &SigCompareConfig) -> FormattingConfig {
    if cli.plain {
        return FormattingConfig::plain();
    }
    let color = cli.color.or(config.color).unwrap_or(ColorMode::Auto);
    FormattingConfig::from_env(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sigcompare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let run = build_run_config(&cli(&["a.rbs", "b.rbs"]), &SigCompareConfig::default());
        assert_eq!(
            run.mode,
            CompareMode::Files {
                original: PathBuf::from("a.rbs"),
                generated: PathBuf::from("b.rbs"),
            }
        );
        assert_eq!(run.options, CompareOptions::default());
        assert_eq!(run.format, OutputFormat::Text);
        assert!(run.extensions.is_empty());
        assert!(!run.quiet);
    }

    #[test]
    fn test_config_file_values_apply() {
        let config = SigCompareConfig {
            strict_param_names: Some(true),
            extensions: Some(vec!["sig".to_string()]),
            quiet: Some(true),
            ..Default::default()
        };
        let run = build_run_config(&cli(&["--dir", "a", "b"]), &config);
        assert!(run.options.strict_param_names);
        assert_eq!(run.extensions, vec!["sig"]);
        assert!(run.quiet);
        assert!(matches!(run.mode, CompareMode::Directories { .. }));
    }

    #[test]
    fn test_flags_override_config() {
        let config = SigCompareConfig {
            extensions: Some(vec!["sig".to_string()]),
            color: Some(ColorMode::Always),
            ..Default::default()
        };
        let run = build_run_config(
            &cli(&["a", "b", "--ext", "rbs", "--plain", "--json", "--normalize-unions"]),
            &config,
        );
        assert_eq!(run.extensions, vec!["rbs"]);
        assert_eq!(run.formatting, FormattingConfig::plain());
        assert_eq!(run.format, OutputFormat::Json);
        assert!(run.options.normalize_unions);
    }

    #[test]
    fn test_explicit_color_flag_wins() {
        let config = SigCompareConfig {
            color: Some(ColorMode::Always),
            ..Default::default()
        };
        let run = build_run_config(&cli(&["a", "b", "--color", "never"]), &config);
        assert_eq!(run.formatting.color, ColorMode::Never);
    }
}
