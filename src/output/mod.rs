pub mod json;
pub mod report;
pub mod terminal;

pub use json::render_json;
pub use report::{aggregate, Report};
pub use terminal::render_text;

use crate::formatting::FormattingConfig;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render `report` and write it to `output_file`, or stdout when none is
/// given. Reports written to a file are never colored.
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    quiet: bool,
    formatting: FormattingConfig,
    output_file: Option<&Path>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Json => render_json(report).context("failed to serialize report")?,
        OutputFormat::Text => {
            let formatting = match output_file {
                Some(_) => FormattingConfig::plain(),
                None => formatting,
            };
            render_text(report, quiet, formatting.formatter().as_ref())
        }
    };

    match output_file {
        Some(path) => {
            crate::io::write_file(path, &format!("{content}\n"))
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::FileResult;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("report.json");
        let report = aggregate(vec![FileResult::from_differences("a.rbs", vec![])]);

        write_report(
            &report,
            OutputFormat::Json,
            false,
            FormattingConfig::default(),
            Some(&nested_path),
        )
        .unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["passed"], serde_json::json!(true));
    }

    #[test]
    fn test_text_report_file_has_no_ansi_codes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        let report = aggregate(vec![FileResult::missing("a.rbs", "generated file not found")]);

        write_report(
            &report,
            OutputFormat::Text,
            false,
            FormattingConfig::new(crate::formatting::ColorMode::Always, true),
            Some(&path),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\u{1b}'));
        assert!(content.contains("[MISSING] a.rbs"));
    }
}
