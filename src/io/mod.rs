pub mod walker;

pub use walker::{pair_directories, FilePair, FileWalker, DEFAULT_EXTENSIONS};

use crate::errors::{Result, SigCompareError};
use std::fs;
use std::path::Path;

/// Read a signature file. `role` names the side in the not-found error.
pub fn read_file(path: &Path, role: &'static str) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SigCompareError::not_found(role, path))
        }
        Err(e) => Err(SigCompareError::io(path, e)),
    }
}

/// Write `content`, creating parent directories first.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| SigCompareError::io(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path).map_err(|e| SigCompareError::io(path, e))?;
    }
    Ok(())
}
