use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::SigCompareConfig;
use crate::errors::{Result, SigCompareError};

pub const CONFIG_FILE_NAME: &str = ".sigcompare.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> std::result::Result<SigCompareConfig, String> {
    let config = toml::from_str::<SigCompareConfig>(contents)
        .map_err(|e| format!("failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    if let Some(extensions) = &config.extensions {
        if extensions.iter().any(|e| e.trim_start_matches('.').is_empty()) {
            return Err("extensions must not be empty".to_string());
        }
    }
    Ok(config)
}

/// Load a config file named on the command line. Any failure is fatal.
pub fn load_config_from(path: &Path) -> Result<SigCompareConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SigCompareError::Config(format!("{}: {e}", path.display())))?;
    let config = parse_config(&contents)
        .map_err(|e| SigCompareError::Config(format!("{}: {e}", path.display())))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try one discovered candidate. A missing file is silent; a broken file
/// is reported and skipped.
fn try_load_config_from_path(config_path: &Path) -> Option<SigCompareConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.sigcompare.toml`.
pub fn discover_config(start: PathBuf) -> SigCompareConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SigCompareConfig::default()
        })
}

/// Explicit path if given, otherwise discovery from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<SigCompareConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    match std::env::current_dir() {
        Ok(current) => Ok(discover_config(current)),
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            Ok(SigCompareConfig::default())
        }
    }
}
