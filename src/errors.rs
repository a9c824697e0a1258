//! Shared error types for the application

use crate::signature::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sigcompare operations
#[derive(Debug, Error)]
pub enum SigCompareError {
    /// A signature file or directory root does not exist
    #[error("{} not found: {}", .role, .path.display())]
    FileNotFound { role: &'static str, path: PathBuf },

    /// A file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A signature document is malformed
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Configuration file errors
    #[error("configuration error: {0}")]
    Config(String),

    /// The external signature generator failed
    #[error("generator command failed: {0}")]
    Generator(String),

    /// Exclude pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl SigCompareError {
    pub fn not_found(role: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound {
            role,
            path: path.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, SigCompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_side() {
        let err = SigCompareError::not_found("generated file", "sig/b.rbs");
        assert_eq!(err.to_string(), "generated file not found: sig/b.rbs");
    }

    #[test]
    fn test_parse_error_message_includes_location() {
        let err = SigCompareError::parse("a.rbs", ParseError::new(3, 7, "expected `end`"));
        assert_eq!(
            err.to_string(),
            "a.rbs: syntax error at line 3, column 7: expected `end`"
        );
    }
}
