use crate::comparison::{Difference, DifferenceKind, FileResult, FileStatus};
use crate::formatting::OutputFormatter;
use crate::output::Report;
use crate::signature::MethodDefinition;

/// Render the human-readable report. In quiet mode `ok` files get no line
/// of their own; the summary is always printed.
pub fn render_text(report: &Report, quiet: bool, fmt: &dyn OutputFormatter) -> String {
    let mut lines = vec![fmt.header(&format!(
        "Signature comparison: {} file{}",
        report.total,
        plural(report.total)
    ))];

    for result in &report.results {
        if quiet && result.passed() {
            continue;
        }
        lines.push(status_line(result, fmt));
        for difference in &result.differences {
            render_difference(difference, fmt, &mut lines);
        }
    }

    lines.push(String::new());
    lines.push(summary_line(report, fmt));
    lines.join("\n")
}

fn status_line(result: &FileResult, fmt: &dyn OutputFormatter) -> String {
    match result.status {
        FileStatus::Ok => format!("{} {}", fmt.success(&fmt.symbol("✓", "[OK]")), result.file),
        FileStatus::Different => {
            let count = result.differences.len();
            format!(
                "{} {}: {} difference{}",
                fmt.error(&fmt.symbol("✗", "[DIFF]")),
                result.file,
                count,
                plural(count)
            )
        }
        FileStatus::Missing => format!(
            "{} {}: {}",
            fmt.warning(&fmt.symbol("⚠", "[MISSING]")),
            result.file,
            result.message.as_deref().unwrap_or("missing")
        ),
        FileStatus::Error => format!(
            "{} {}: {}",
            fmt.error(&fmt.symbol("✗", "[ERROR]")),
            result.file,
            result.message.as_deref().unwrap_or("error")
        ),
    }
}

fn render_difference(diff: &Difference, fmt: &dyn OutputFormatter, lines: &mut Vec<String>) {
    let label = match diff.kind {
        DifferenceKind::MissingInGenerated => fmt.error("missing in generated"),
        DifferenceKind::MissingInOriginal => fmt.warning("missing in original"),
        DifferenceKind::MethodMismatch => fmt.error("method mismatch"),
    };

    let subject = match (&diff.member_type, &diff.item, &diff.method) {
        (Some(member_type), Some(item), _) => format!("{member_type} {item}"),
        (_, _, Some(method)) => format!("method {method}"),
        _ => "declaration".to_string(),
    };
    lines.push(format!("  {}: {label}: {subject}", diff.declaration));

    push_method(lines, "original: ", diff.original.as_ref(), fmt);
    push_method(lines, "generated:", diff.generated.as_ref(), fmt);
}

fn push_method(
    lines: &mut Vec<String>,
    side: &str,
    method: Option<&MethodDefinition>,
    fmt: &dyn OutputFormatter,
) {
    if let Some(method) = method {
        lines.push(format!("      {} {method}", fmt.dim(side)));
    }
}

fn summary_line(report: &Report, fmt: &dyn OutputFormatter) -> String {
    let verdict = if report.passed {
        fmt.success("PASSED")
    } else {
        fmt.error("FAILED")
    };
    format!(
        "{verdict}: {} of {} file{} matched, {} failed ({} difference{})",
        report.passed_count,
        report.total,
        plural(report.total),
        report.failed_count,
        report.difference_count(),
        plural(report.difference_count())
    )
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
