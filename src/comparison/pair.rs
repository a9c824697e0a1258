//! File-level comparison: read, parse and diff one or many file pairs.

use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

use crate::comparison::comparator::compare;
use crate::comparison::types::{CompareOptions, FileResult};
use crate::errors::{Result, SigCompareError};
use crate::io::{read_file, FilePair};
use crate::signature::{parse, Declaration};

/// Read and parse one signature file.
pub fn load_declarations(path: &Path, role: &'static str) -> Result<Vec<Declaration>> {
    let source = read_file(path, role)?;
    let declarations = parse(&source).map_err(|e| SigCompareError::parse(path, e))?;
    debug!(
        path = %path.display(),
        declarations = declarations.len(),
        "parsed signature file"
    );
    Ok(declarations)
}

/// Compare one pair. Failures become the result's status instead of
/// propagating, so one bad file never hides the others.
pub fn compare_pair(pair: &FilePair, options: CompareOptions) -> FileResult {
    let loaded = load_declarations(&pair.original, "original file").and_then(|original| {
        load_declarations(&pair.generated, "generated file").map(|generated| (original, generated))
    });

    match loaded {
        Ok((original, generated)) => {
            FileResult::from_differences(&pair.label, compare(&original, &generated, options))
        }
        Err(err @ SigCompareError::FileNotFound { .. }) => {
            FileResult::missing(&pair.label, err.to_string())
        }
        Err(err) => {
            warn!(file = %pair.label, error = %err, "could not compare file pair");
            FileResult::error(&pair.label, err.to_string())
        }
    }
}

/// Compare pairs in parallel. Results are sorted by label.
pub fn compare_pairs(pairs: &[FilePair], options: CompareOptions) -> Vec<FileResult> {
    let mut results: Vec<FileResult> = pairs
        .par_iter()
        .map(|pair| compare_pair(pair, options))
        .collect();
    results.sort_by(|a, b| a.file.cmp(&b.file));
    results
}
