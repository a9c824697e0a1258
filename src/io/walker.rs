use crate::errors::{Result, SigCompareError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extensions picked up in directory mode when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["rbs", "sig"];

/// An original signature file and the generated file it is checked against.
/// `label` is how the pair is named in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub label: String,
    pub original: PathBuf,
    pub generated: PathBuf,
}

impl FilePair {
    /// Single-file mode: the label is the original path as given.
    pub fn single(original: impl Into<PathBuf>, generated: impl Into<PathBuf>) -> Self {
        let original = original.into();
        Self {
            label: original.display().to_string(),
            original,
            generated: generated.into(),
        }
    }
}

pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        if !extensions.is_empty() {
            self.extensions = extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
        self
    }

    /// Glob patterns matched against paths relative to the root.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, glob::PatternError>>()?;
        Ok(self)
    }

    /// Signature files under the root, as sorted relative paths.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(SigCompareError::not_found("directory", &self.root));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                SigCompareError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if self.should_process(relative) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        debug!(root = %self.root.display(), count = files.len(), "walked signature directory");
        Ok(files)
    }

    fn should_process(&self, relative: &Path) -> bool {
        let Some(ext) = relative.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        if !self.extensions.iter().any(|e| *e == ext) {
            return false;
        }
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }
}

/// Pair every signature file under `original_dir` with the same relative
/// path under `generated_dir`. Files present only on the generated side are
/// not reported.
pub fn pair_directories(
    original_dir: &Path,
    generated_dir: &Path,
    extensions: &[String],
    ignore_patterns: &[String],
) -> Result<Vec<FilePair>> {
    if !original_dir.is_dir() {
        return Err(SigCompareError::not_found("original directory", original_dir));
    }
    if !generated_dir.is_dir() {
        return Err(SigCompareError::not_found("generated directory", generated_dir));
    }

    let files = FileWalker::new(original_dir.to_path_buf())
        .with_extensions(extensions)
        .with_ignore_patterns(ignore_patterns)?
        .walk()?;
    info!(
        original = %original_dir.display(),
        generated = %generated_dir.display(),
        files = files.len(),
        "discovered signature files"
    );

    Ok(files
        .into_iter()
        .map(|relative| FilePair {
            label: relative_label(&relative),
            original: original_dir.join(&relative),
            generated: generated_dir.join(&relative),
        })
        .collect())
}

/// Forward-slash label so reports read the same on every platform.
fn relative_label(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_walk_filters_by_extension_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.rbs");
        touch(dir.path(), "a.sig");
        touch(dir.path(), "nested/c.rbs");
        touch(dir.path(), "notes.txt");

        let files = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.sig"),
                PathBuf::from("b.rbs"),
                PathBuf::from("nested/c.rbs"),
            ]
        );
    }

    #[test]
    fn test_custom_extensions_replace_defaults() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.rbs");
        touch(dir.path(), "b.rbi");

        let files = FileWalker::new(dir.path().to_path_buf())
            .with_extensions(&[".rbi".to_string()])
            .walk()
            .unwrap();
        assert_eq!(files, vec![PathBuf::from("b.rbi")]);
    }

    #[test]
    fn test_ignore_patterns_match_relative_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "keep.rbs");
        touch(dir.path(), "vendor/gem.rbs");

        let files = FileWalker::new(dir.path().to_path_buf())
            .with_ignore_patterns(&["vendor/**".to_string()])
            .unwrap()
            .walk()
            .unwrap();
        assert_eq!(files, vec![PathBuf::from("keep.rbs")]);
    }

    #[test]
    fn test_invalid_ignore_pattern_is_rejected() {
        let result = FileWalker::new(PathBuf::from(".")).with_ignore_patterns(&["[".to_string()]);
        assert!(matches!(result, Err(SigCompareError::Pattern(_))));
    }

    #[test]
    fn test_pair_directories_ignores_generated_only_files() {
        let original = TempDir::new().unwrap();
        let generated = TempDir::new().unwrap();
        touch(original.path(), "a.sig");
        touch(original.path(), "models/b.sig");
        touch(generated.path(), "a.sig");
        touch(generated.path(), "extra.sig");

        let pairs = pair_directories(original.path(), generated.path(), &[], &[]).unwrap();
        let labels: Vec<_> = pairs.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["a.sig", "models/b.sig"]);
        assert_eq!(pairs[1].generated, generated.path().join("models/b.sig"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = pair_directories(&missing, dir.path(), &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            SigCompareError::FileNotFound { role: "original directory", .. }
        ));
    }
}
