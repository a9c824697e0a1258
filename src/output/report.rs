use crate::comparison::{FileResult, FileStatus};
use serde::Serialize;

/// Aggregated outcome of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub passed: bool,
    pub total: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn count(&self, status: FileStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn difference_count(&self) -> usize {
        self.results.iter().map(|r| r.differences.len()).sum()
    }
}

/// Fold per-file results into a report. The run passes iff every file is
/// `ok`; an empty run passes.
pub fn aggregate(mut results: Vec<FileResult>) -> Report {
    results.sort_by(|a, b| a.file.cmp(&b.file));
    let passed_count = results.iter().filter(|r| r.passed()).count();
    Report {
        passed: passed_count == results.len(),
        total: results.len(),
        passed_count,
        failed_count: results.len() - passed_count,
        results,
    }
}
